//! `SQLite` database connection.
//!
//! The database is stored at `~/.tasker/tasker.db` and holds the task
//! groups, lists and tasks.

use rusqlite::Connection;
use tracing::debug;

use crate::config::Paths;
use crate::error::TaskerError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, TaskerError> {
        let paths = Paths::new()?;
        Self::open_with_paths(&paths)
    }

    /// Open the database described by `paths`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, database or migrations fail.
    pub fn open_with_paths(paths: &Paths) -> Result<Self, TaskerError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, TaskerError> {
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path).map_err(|e| {
            TaskerError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, TaskerError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TaskerError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, TaskerError> {
        // Cascading list and group deletes depend on this
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| TaskerError::Database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        migrations::run(&db.conn)?;

        Ok(db)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, TaskerError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
