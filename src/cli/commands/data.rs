//! Export, import and clear command implementations.

use std::path::Path;

use crate::error::TaskerError;
use crate::storage::TaskStore;

/// Execute the export command.
///
/// Returns the JSON itself, or a confirmation when written to `file`.
///
/// # Errors
///
/// Returns an error if loading or writing fails.
pub fn export(store: &TaskStore, file: Option<&Path>) -> Result<String, TaskerError> {
    let json = store.export_json()?;
    match file {
        Some(path) => {
            std::fs::write(path, json)?;
            Ok(format!("Exported data to {}", path.display()))
        }
        None => Ok(json),
    }
}

/// Execute the import command. Existing data is replaced.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds invalid data.
pub fn import(store: &TaskStore, path: &Path) -> Result<String, TaskerError> {
    let json = std::fs::read_to_string(path)?;
    let data = store.import_json(&json)?;
    Ok(format!(
        "Imported {} task(s), {} list(s), {} group(s)",
        data.tasks.len(),
        data.lists.len(),
        data.groups.len()
    ))
}

/// Execute the clear command.
///
/// # Errors
///
/// Returns `InvalidInput` unless `confirmed`, or a storage error.
pub fn clear(store: &TaskStore, confirmed: bool) -> Result<String, TaskerError> {
    if !confirmed {
        return Err(TaskerError::InvalidInput(
            "Refusing to delete all data without --yes".to_string(),
        ));
    }
    if store.load()?.is_empty() {
        return Ok("Nothing to clear".to_string());
    }
    store.clear()?;
    Ok("Deleted all tasks, lists and groups".to_string())
}
