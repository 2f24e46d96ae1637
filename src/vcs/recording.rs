// ABOUTME: In-memory doubles for the git and hg clients
// ABOUTME: Record issued actions and lay down minimal clone directory structures

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::vcs::{GitOps, HgOps, ToolRun};

fn seed_working_tree(root: &Path, files: &[(String, String)]) -> Result<()> {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Git double that records actions and simulates a clone on disk.
///
/// `clone_repo` creates the destination directory with a `.git/HEAD` marker
/// and the configured seed files, so the merge step downstream has a real
/// tree to operate on. Clones share the recorded action list.
#[derive(Clone, Default)]
pub struct RecordingGit {
    actions: Arc<Mutex<Vec<String>>>,
    seed_files: Vec<(String, String)>,
}

impl RecordingGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written into the working tree when `clone_repo` runs,
    /// as (relative path, content) pairs.
    pub fn with_seed_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            seed_files: files
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        }
    }

    /// Actions issued so far, in order.
    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, action: String) -> Result<ToolRun> {
        self.actions.lock().unwrap().push(action);
        Ok(ToolRun::succeeded())
    }
}

#[async_trait]
impl GitOps for RecordingGit {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<ToolRun> {
        let git_dir = dest.join(".git");
        fs::create_dir_all(&git_dir)
            .with_context(|| format!("Failed to create {}", git_dir.display()))?;
        let head = git_dir.join("HEAD");
        fs::write(&head, "ref: refs/heads/main\n")
            .with_context(|| format!("Failed to write {}", head.display()))?;
        seed_working_tree(dest, &self.seed_files)?;
        self.record(format!("clone {}", url))
    }

    async fn checkout(&self, _repo: &Path, rev: &str) -> Result<ToolRun> {
        self.record(format!("checkout {}", rev))
    }

    async fn create_branch(&self, _repo: &Path, branch: &str) -> Result<ToolRun> {
        self.record(format!("checkout -b {}", branch))
    }

    async fn stage_all(&self, _repo: &Path) -> Result<ToolRun> {
        self.record("add --all".to_string())
    }

    async fn commit(&self, _repo: &Path, message: &str) -> Result<ToolRun> {
        self.record(format!("commit {}", message))
    }

    async fn push(&self, _repo: &Path, branch: &str) -> Result<ToolRun> {
        self.record(format!("push origin {}", branch))
    }
}

/// Mercurial double that records actions and simulates a clone on disk.
///
/// `clone_repo` creates the staging directory with a `.hg/requires` marker
/// and the configured seed files.
#[derive(Clone, Default)]
pub struct RecordingHg {
    actions: Arc<Mutex<Vec<String>>>,
    seed_files: Vec<(String, String)>,
}

impl RecordingHg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
            seed_files: files
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
        }
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, action: String) -> Result<ToolRun> {
        self.actions.lock().unwrap().push(action);
        Ok(ToolRun::succeeded())
    }
}

#[async_trait]
impl HgOps for RecordingHg {
    async fn clone_repo(&self, url: &str, dest: &Path) -> Result<ToolRun> {
        let hg_dir = dest.join(".hg");
        fs::create_dir_all(&hg_dir)
            .with_context(|| format!("Failed to create {}", hg_dir.display()))?;
        let requires = hg_dir.join("requires");
        fs::write(&requires, "store\n")
            .with_context(|| format!("Failed to write {}", requires.display()))?;
        seed_working_tree(dest, &self.seed_files)?;
        self.record(format!("clone {}", url))
    }

    async fn update_clean(&self, _repo: &Path, rev: &str) -> Result<ToolRun> {
        self.record(format!("update --clean --rev {}", rev))
    }

    async fn purge(&self, _repo: &Path) -> Result<ToolRun> {
        self.record("purge --all".to_string())
    }
}
