// ABOUTME: Working directory layout for one migration run
// ABOUTME: Threads explicit paths through every step instead of changing CWD

use std::path::{Path, PathBuf};

/// The three filesystem locations a migration run touches.
///
/// Each is expected to be absent before the corresponding clone or copy step
/// begins; the runner prompts the operator before deleting the destination or
/// staging checkout.
#[derive(Debug, Clone)]
pub struct WorkingPaths {
    /// Git clone that receives the squashed commit.
    pub destination: PathBuf,
    /// Mercurial clone the revision's files are extracted from.
    pub staging: PathBuf,
    /// Holding location for `.git` while the destination tree is rebuilt.
    pub metadata_hold: PathBuf,
}

impl WorkingPaths {
    /// Standard layout underneath a single work directory.
    pub fn under(root: &Path) -> Self {
        Self {
            destination: root.join("github"),
            staging: root.join("mercurial"),
            metadata_hold: root.join("git-metadata.hold"),
        }
    }

    pub fn git_dir(&self) -> PathBuf {
        self.destination.join(".git")
    }

    pub fn hg_dir(&self) -> PathBuf {
        self.staging.join(".hg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_root() {
        let paths = WorkingPaths::under(Path::new("/tmp/migration"));
        assert_eq!(paths.destination, PathBuf::from("/tmp/migration/github"));
        assert_eq!(paths.staging, PathBuf::from("/tmp/migration/mercurial"));
        assert_eq!(
            paths.metadata_hold,
            PathBuf::from("/tmp/migration/git-metadata.hold")
        );
        assert_eq!(paths.git_dir(), PathBuf::from("/tmp/migration/github/.git"));
        assert_eq!(
            paths.hg_dir(),
            PathBuf::from("/tmp/migration/mercurial/.hg")
        );
    }
}
