//! Error types for tasker.

use thiserror::Error;

/// Errors produced by the tasker library.
///
/// The natural language parser never fails; these cover configuration,
/// storage and the CLI surface around it.
#[derive(Debug, Error)]
pub enum TaskerError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A task, list or group does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected before reaching storage.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for TaskerError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
