// ABOUTME: Mercurial client capability for the source repository
// ABOUTME: Wraps clone, clean update, and purge invocations

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::vcs::{run_tool, ToolRun};

/// Operations the migration issues against the source Mercurial repository.
#[async_trait]
pub trait HgOps {
    /// `hg clone <url> <dest>`
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<ToolRun>;
    /// `hg update --clean --rev <rev>`
    async fn update_clean(&self, repo: &Path, rev: &str) -> Result<ToolRun>;
    /// `hg purge --all`, removing every file not tracked at the current revision
    async fn purge(&self, repo: &Path) -> Result<ToolRun>;
}

/// Shells out to the `hg` binary on PATH.
pub struct Hg;

#[async_trait]
impl HgOps for Hg {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<ToolRun> {
        tracing::info!("Cloning {} into {}", url, dest.display());
        let dest = dest.to_string_lossy();
        run_tool("hg", &["clone", url, dest.as_ref()], None)
    }

    async fn update_clean(&self, repo: &Path, rev: &str) -> Result<ToolRun> {
        tracing::info!("Updating working copy to '{}'", rev);
        run_tool("hg", &["update", "--clean", "--rev", rev], Some(repo))
    }

    async fn purge(&self, repo: &Path) -> Result<ToolRun> {
        tracing::info!("Purging untracked files");
        // The purge extension ships with Mercurial but is disabled by default.
        run_tool(
            "hg",
            &["purge", "--all", "--config", "extensions.purge="],
            Some(repo),
        )
    }
}
