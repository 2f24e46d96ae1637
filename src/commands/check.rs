// ABOUTME: Prerequisite check command
// ABOUTME: Verifies git and hg are installed and reports their versions

use anyhow::Result;

use crate::utils;
use crate::vcs;

/// Entry point for the `check` subcommand.
///
/// Fails with installation hints when either client is missing from PATH.
pub async fn check() -> Result<()> {
    utils::banner("Checking migration prerequisites");

    utils::check_required_tools()?;

    for tool in ["git", "hg"] {
        let run = vcs::run_tool(tool, &["--version"], None)?;
        if run.success {
            let version = run.stdout.lines().next().unwrap_or("").trim().to_string();
            tracing::info!("✓ {} available: {}", tool, version);
        } else {
            tracing::warn!("⚠ {} --version exited with failure: {}", tool, run.stderr.trim());
        }
    }

    utils::banner("All prerequisites satisfied");
    Ok(())
}
