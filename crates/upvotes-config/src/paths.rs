//! File system paths for the upvotes tools.

use crate::{ConfigError, ConfigResult};
use std::path::PathBuf;

/// Manages file system paths under the base directory (`~/.upvotes`).
#[derive(Debug, Clone)]
pub struct Paths {
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.upvotes`.
    pub fn new() -> ConfigResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".upvotes"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.upvotes/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the logs directory (~/.upvotes/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the JSONL log file (~/.upvotes/logs/dev.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("dev.jsonl")
    }

    /// Create the base and logs directories if missing.
    pub fn ensure_dirs(&self) -> ConfigResult<()> {
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_are_rooted_at_base_dir() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/upvotes-test"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/upvotes-test/config.json")
        );
        assert_eq!(
            paths.log_file(),
            PathBuf::from("/tmp/upvotes-test/logs/dev.jsonl")
        );
    }

    #[test]
    fn ensure_dirs_creates_logs_dir() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("nested"));

        paths.ensure_dirs().unwrap();
        assert!(paths.logs_dir().is_dir());
    }
}
