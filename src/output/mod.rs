//! Output formatting for tasker.
//!
//! This module provides formatters for displaying tasks, lists, groups and
//! parse results in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::TaskerError;
use crate::features::nlp::ParsedTaskInput;
use crate::tasks::{Task, TaskGroup, TaskList};

pub use json::*;
pub use pretty::*;

/// Format tasks, grouped under their lists.
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    lists: &[TaskList],
    format: OutputFormat,
) -> Result<String, TaskerError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, lists)),
        OutputFormat::Json => format_tasks_json(tasks),
    }
}

/// Format a single task.
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, TaskerError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format lists, showing the group each belongs to.
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_lists(
    lists: &[TaskList],
    groups: &[TaskGroup],
    format: OutputFormat,
) -> Result<String, TaskerError> {
    match format {
        OutputFormat::Pretty => Ok(format_lists_pretty(lists, groups)),
        OutputFormat::Json => format_lists_json(lists),
    }
}

/// Format groups.
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_groups(groups: &[TaskGroup], format: OutputFormat) -> Result<String, TaskerError> {
    match format {
        OutputFormat::Pretty => Ok(format_groups_pretty(groups)),
        OutputFormat::Json => format_groups_json(groups),
    }
}

/// Format a parse result that has not been stored.
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_parsed(parsed: &ParsedTaskInput, format: OutputFormat) -> Result<String, TaskerError> {
    match format {
        OutputFormat::Pretty => Ok(format_parsed_pretty(parsed)),
        OutputFormat::Json => format_parsed_json(parsed),
    }
}
