// ABOUTME: Utility functions for prerequisite checks and operator output
// ABOUTME: Provides tool availability validation and banner-style phase markers

use anyhow::{bail, Result};
use which::which;

/// Check that the required version control clients are available
///
/// Verifies that `git` and `hg` are installed and in PATH.
///
/// # Errors
///
/// Returns an error with installation instructions if either tool is missing.
pub fn check_required_tools() -> Result<()> {
    let tools = ["git", "hg"];
    let mut missing = Vec::new();

    for tool in &tools {
        if which(tool).is_err() {
            missing.push(*tool);
        }
    }

    if !missing.is_empty() {
        bail!(
            "Missing required version control clients: {}\n\
             \n\
             Please install the missing tools:\n\
             - git: sudo apt-get install git / brew install git\n\
             - hg: sudo apt-get install mercurial / brew install mercurial / pip install mercurial",
            missing.join(", ")
        );
    }

    Ok(())
}

/// Print a banner-style status line marking a phase boundary.
///
/// The same format announces every phase and the final outcome, so the
/// operator can follow the sequence in a scrolling terminal.
pub fn banner(message: &str) {
    println!();
    println!("========================================");
    println!("{}", message);
    println!("========================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_required_tools() {
        // Passes on machines with git and hg installed; on machines without
        // them we expect the specific install-hint message instead.
        if let Err(err) = check_required_tools() {
            let err_msg = err.to_string();
            assert!(err_msg.contains("Missing required version control clients"));
            assert!(err_msg.contains("git") || err_msg.contains("hg"));
        }
    }
}
