// ABOUTME: Filesystem operations used by the migration runner
// ABOUTME: Recursive delete and merge-copy with contextual error reporting

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Recursively delete a directory tree.
pub fn remove_tree(path: &Path) -> Result<()> {
    fs::remove_dir_all(path)
        .with_context(|| format!("Failed to delete {}", path.display()))
}

/// Recursively copy `src` into `dst`, merging with whatever is already there.
///
/// Directories are created as needed, files are overwritten by path, and
/// files present only in `dst` are left untouched. Symlinked files are
/// copied by content.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("Failed to read {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", src.display()))?;
        let target = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", entry.path().display()))?;

        if file_type.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}
