//! Database migrations for tasker.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;
use tracing::debug;

use crate::error::TaskerError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, TaskerError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| TaskerError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), TaskerError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| TaskerError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), TaskerError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        debug!(version, "running schema migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), TaskerError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(TaskerError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Deleting a list deletes its tasks; deleting a group leaves its lists
/// ungrouped.
fn migrate_v1(conn: &Connection) -> Result<(), TaskerError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS task_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            color TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS task_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            group_id INTEGER REFERENCES task_groups(id) ON DELETE SET NULL,
            color TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            completed INTEGER NOT NULL DEFAULT 0,
            list_id INTEGER NOT NULL REFERENCES task_lists(id) ON DELETE CASCADE,
            color TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            due_date INTEGER,
            priority INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_task_lists_group ON task_lists(group_id, position);
        CREATE INDEX IF NOT EXISTS idx_tasks_list ON tasks(list_id, position);
        CREATE INDEX IF NOT EXISTS idx_tasks_due ON tasks(due_date);
        ",
    )
    .map_err(|e| TaskerError::Database(format!("Migration v1 failed: {e}")))
}
