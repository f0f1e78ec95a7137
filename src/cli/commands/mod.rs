//! Command implementations for tasker.
//!
//! Every command returns the text `main` prints.

mod add;
mod completions;
mod data;
mod lists;
mod tasks;

pub use add::{add, parse};
pub use completions::completions;
pub use data::{clear, export, import};
pub use lists::{groups, lists};
pub use tasks::{done, edit, move_task, remove, tasks};

use chrono::{Local, NaiveDateTime};

use crate::core::parse_reference_instant;
use crate::error::TaskerError;
use crate::storage::TaskStore;
use crate::tasks::{TaskGroup, TaskList};

/// The moment natural language input is resolved against.
///
/// # Errors
///
/// Returns `InvalidInput` if `now` is given but not a recognized date.
fn reference_instant(now: Option<&str>) -> Result<NaiveDateTime, TaskerError> {
    match now {
        Some(text) => parse_reference_instant(text).ok_or_else(|| {
            TaskerError::InvalidInput(format!(
                "Invalid --now value '{text}' (expected YYYY-MM-DD [HH:MM[:SS]])"
            ))
        }),
        None => Ok(Local::now().naive_local()),
    }
}

fn require_list(store: &TaskStore, name: &str) -> Result<TaskList, TaskerError> {
    store
        .find_list_by_name(name)?
        .ok_or_else(|| TaskerError::NotFound(format!("list '{name}'")))
}

fn require_group(store: &TaskStore, name: &str) -> Result<TaskGroup, TaskerError> {
    store
        .find_group_by_name(name)?
        .ok_or_else(|| TaskerError::NotFound(format!("group '{name}'")))
}
