//! Path resolution for tasker configuration and data files.
//!
//! All tasker data is stored in `~/.tasker/` unless `TASKER_HOME` points
//! elsewhere:
//! - `config.yaml` - Main configuration file
//! - `tasker.db` - SQLite database holding groups, lists and tasks

use std::path::PathBuf;

use crate::error::TaskerError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "TASKER_HOME";

/// Paths to tasker configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.tasker/`
    pub root: PathBuf,
    /// Config file: `~/.tasker/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.tasker/tasker.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `TASKER_HOME`, falling back to `$HOME/.tasker`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, TaskerError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            TaskerError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".tasker")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("tasker.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), TaskerError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                TaskerError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
