// ABOUTME: Configuration resolution for the migration run
// ABOUTME: Merges CLI flags with an optional TOML config file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional on-disk configuration, usually `migration-config.toml`.
///
/// Every key is optional; CLI flags override file values during
/// [`MigrationConfig::resolve`].
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub source_url: Option<String>,
    pub destination_url: Option<String>,
    pub work_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Fully resolved settings for one migration run.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Mercurial repository the history is migrated from.
    pub source_url: String,
    /// Git repository that receives the squashed commit.
    pub destination_url: String,
    /// Root directory holding both working clones.
    pub work_dir: PathBuf,
    /// Delete pre-existing working directories without prompting.
    pub assume_yes: bool,
}

impl MigrationConfig {
    /// Merge CLI flags with the optional config file. Flags win.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository URL is supplied neither on the
    /// command line nor in the config file, or if the file cannot be read
    /// or parsed.
    pub fn resolve(
        config_path: Option<&Path>,
        source: Option<String>,
        dest: Option<String>,
        work_dir: Option<PathBuf>,
        assume_yes: bool,
    ) -> Result<Self> {
        let file = match config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let source_url = source.or(file.source_url).context(
            "No source repository URL given.\n\
             Pass --source <hg-url> or set source_url in the config file",
        )?;
        let destination_url = dest.or(file.destination_url).context(
            "No destination repository URL given.\n\
             Pass --dest <git-url> or set destination_url in the config file",
        )?;
        let work_dir = work_dir
            .or(file.work_dir)
            .unwrap_or_else(|| PathBuf::from("migration-work"));

        Ok(Self {
            source_url,
            destination_url,
            work_dir,
            assume_yes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_from_flags_only() {
        let config = MigrationConfig::resolve(
            None,
            Some("https://hg.example.org/repo".to_string()),
            Some("https://github.com/example/repo.git".to_string()),
            None,
            false,
        )
        .unwrap();

        assert_eq!(config.source_url, "https://hg.example.org/repo");
        assert_eq!(config.destination_url, "https://github.com/example/repo.git");
        assert_eq!(config.work_dir, PathBuf::from("migration-work"));
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_resolve_missing_urls() {
        let result = MigrationConfig::resolve(None, None, None, None, false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("--source"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migration-config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "source_url = \"https://hg.example.org/repo\"").unwrap();
        writeln!(
            file,
            "destination_url = \"https://github.com/example/repo.git\""
        )
        .unwrap();
        writeln!(file, "work_dir = \"/tmp/migration\"").unwrap();

        let config = MigrationConfig::resolve(Some(&path), None, None, None, true).unwrap();
        assert_eq!(config.source_url, "https://hg.example.org/repo");
        assert_eq!(config.work_dir, PathBuf::from("/tmp/migration"));
        assert!(config.assume_yes);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("migration-config.toml");
        fs::write(
            &path,
            "source_url = \"https://hg.example.org/old\"\n\
             destination_url = \"https://github.com/example/old.git\"\n",
        )
        .unwrap();

        let config = MigrationConfig::resolve(
            Some(&path),
            Some("https://hg.example.org/new".to_string()),
            None,
            None,
            false,
        )
        .unwrap();

        assert_eq!(config.source_url, "https://hg.example.org/new");
        assert_eq!(config.destination_url, "https://github.com/example/old.git");
    }

    #[test]
    fn test_load_config_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "source_url = [not toml").unwrap();

        let result = ConfigFile::load(&path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config file"));
    }
}
