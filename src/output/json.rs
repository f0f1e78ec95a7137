//! JSON output formatting for tasker.

use serde::Serialize;
use serde_json::json;

use crate::error::TaskerError;
use crate::features::nlp::ParsedTaskInput;
use crate::tasks::{Task, TaskGroup, TaskList};

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task]) -> Result<String, TaskerError> {
    let output = json!({
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format lists as JSON
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_lists_json(lists: &[TaskList]) -> Result<String, TaskerError> {
    let output = json!({
        "count": lists.len(),
        "items": lists
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format groups as JSON
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_groups_json(groups: &[TaskGroup]) -> Result<String, TaskerError> {
    let output = json!({
        "count": groups.len(),
        "items": groups
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a parse result as JSON.
///
/// `due` is local wall-clock time; `dueDate` is the same moment in epoch
/// milliseconds, as stored on a task.
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn format_parsed_json(parsed: &ParsedTaskInput) -> Result<String, TaskerError> {
    let output = json!({
        "title": parsed.title,
        "due": parsed.due_iso(),
        "dueDate": parsed.due_timestamp_millis(),
        "priority": parsed.priority,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `TaskerError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TaskerError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_parsed_json() {
        let parsed = ParsedTaskInput {
            title: "Buy milk".to_string(),
            due: NaiveDate::from_ymd_opt(2024, 3, 12).and_then(|d| d.and_hms_opt(17, 0, 0)),
            priority: true,
        };

        let value: serde_json::Value =
            serde_json::from_str(&format_parsed_json(&parsed).unwrap()).unwrap();
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["due"], "2024-03-12T17:00:00");
        assert_eq!(value["priority"], true);
        assert!(value["dueDate"].is_i64());
    }

    #[test]
    fn test_format_parsed_json_without_due() {
        let parsed = ParsedTaskInput {
            title: "Just a title".to_string(),
            ..Default::default()
        };

        let value: serde_json::Value =
            serde_json::from_str(&format_parsed_json(&parsed).unwrap()).unwrap();
        assert!(value["due"].is_null());
        assert!(value["dueDate"].is_null());
        assert_eq!(value["priority"], false);
    }

    #[test]
    fn test_format_tasks_json_counts() {
        let value: serde_json::Value =
            serde_json::from_str(&format_tasks_json(&[]).unwrap()).unwrap();
        assert_eq!(value["count"], 0);
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
