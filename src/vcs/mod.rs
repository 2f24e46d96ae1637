// ABOUTME: Version control client capabilities and the shared tool runner
// ABOUTME: Exports git and hg clients plus recording doubles for tests

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

pub mod git;
pub mod hg;
pub mod recording;

pub use git::{Git, GitOps};
pub use hg::{Hg, HgOps};
pub use recording::{RecordingGit, RecordingHg};

/// Captured result of one external-tool invocation.
///
/// A non-zero exit is not an `Err` — the caller decides whether a failed
/// invocation matters.
#[derive(Debug, Clone)]
pub struct ToolRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolRun {
    /// A successful run with no output, for test doubles.
    pub fn succeeded() -> Self {
        Self {
            success: true,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Invoke an external tool and capture its output.
///
/// # Errors
///
/// Returns an error only when the process cannot be started at all; a
/// non-zero exit is reported through [`ToolRun::success`].
pub fn run_tool(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<ToolRun> {
    tracing::debug!("Running {} {}", program, args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .with_context(|| format!("Failed to execute {}. Is it installed and on PATH?", program))?;

    Ok(ToolRun {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_tool_missing_program() {
        let result = run_tool("definitely-not-a-real-tool-xyz", &[], None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("definitely-not-a-real-tool-xyz"));
    }

    #[test]
    fn test_run_tool_captures_output() {
        let run = run_tool("sh", &["-c", "echo out; echo err >&2"], None).unwrap();
        assert!(run.success);
        assert_eq!(run.stdout.trim(), "out");
        assert_eq!(run.stderr.trim(), "err");
    }

    #[test]
    fn test_run_tool_reports_failure_exit() {
        let run = run_tool("sh", &["-c", "exit 3"], None).unwrap();
        assert!(!run.success);
    }
}
