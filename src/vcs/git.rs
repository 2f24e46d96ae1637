// ABOUTME: Git client capability for the destination repository
// ABOUTME: Wraps clone, checkout, branch, commit, and push invocations

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::vcs::{run_tool, ToolRun};

/// Operations the migration issues against the destination Git repository.
#[async_trait]
pub trait GitOps {
    /// `git clone <url> <dest>`
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<ToolRun>;
    /// `git checkout <rev>` for an existing branch or tag
    async fn checkout(&self, repo: &Path, rev: &str) -> Result<ToolRun>;
    /// `git checkout -b <branch>` from the current HEAD
    async fn create_branch(&self, repo: &Path, branch: &str) -> Result<ToolRun>;
    /// `git add --all`
    async fn stage_all(&self, repo: &Path) -> Result<ToolRun>;
    /// `git commit -m <message>`
    async fn commit(&self, repo: &Path, message: &str) -> Result<ToolRun>;
    /// `git push origin <branch>`
    async fn push(&self, repo: &Path, branch: &str) -> Result<ToolRun>;
}

/// Shells out to the `git` binary on PATH.
pub struct Git;

#[async_trait]
impl GitOps for Git {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<ToolRun> {
        tracing::info!("Cloning {} into {}", url, dest.display());
        let dest = dest.to_string_lossy();
        run_tool("git", &["clone", url, dest.as_ref()], None)
    }

    async fn checkout(&self, repo: &Path, rev: &str) -> Result<ToolRun> {
        tracing::info!("Checking out '{}'", rev);
        run_tool("git", &["checkout", rev], Some(repo))
    }

    async fn create_branch(&self, repo: &Path, branch: &str) -> Result<ToolRun> {
        tracing::info!("Creating branch '{}'", branch);
        run_tool("git", &["checkout", "-b", branch], Some(repo))
    }

    async fn stage_all(&self, repo: &Path) -> Result<ToolRun> {
        run_tool("git", &["add", "--all"], Some(repo))
    }

    async fn commit(&self, repo: &Path, message: &str) -> Result<ToolRun> {
        tracing::info!("Committing staged changes");
        run_tool("git", &["commit", "-m", message], Some(repo))
    }

    async fn push(&self, repo: &Path, branch: &str) -> Result<ToolRun> {
        tracing::info!("Pushing '{}' to origin", branch);
        run_tool("git", &["push", "origin", branch], Some(repo))
    }
}
