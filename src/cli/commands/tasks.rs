//! Task command implementations.

use super::{reference_instant, require_list};
use crate::cli::args::{EditArgs, OutputFormat};
use crate::error::TaskerError;
use crate::features::nlp::parse_task_input_at;
use crate::output::{format_task, format_tasks};
use crate::storage::TaskStore;
use crate::tasks::TaskUpdate;

/// Execute the tasks command.
///
/// # Errors
///
/// Returns an error if the named list does not exist or storage fails.
pub fn tasks(
    store: &TaskStore,
    list: Option<&str>,
    open_only: bool,
    format: OutputFormat,
) -> Result<String, TaskerError> {
    let list_id = list
        .map(|name| require_list(store, name))
        .transpose()?
        .map(|list| list.id);

    let mut tasks = store.tasks(list_id)?;
    if open_only {
        tasks.retain(|t| !t.completed);
    }

    format_tasks(&tasks, &store.lists()?, format)
}

/// Execute the done command.
///
/// # Errors
///
/// Returns an error if the task does not exist.
pub fn done(store: &TaskStore, id: i64, format: OutputFormat) -> Result<String, TaskerError> {
    let task = store.toggle_task_complete(id)?;
    match format {
        OutputFormat::Json => format_task(&task, format),
        OutputFormat::Pretty => {
            let state = if task.completed { "Completed" } else { "Reopened" };
            Ok(format!("{state} task {}: {}", task.id, task.title))
        }
    }
}

/// Execute the edit command.
///
/// `--due` is read with the natural language parser and must contain a date
/// or time.
///
/// # Errors
///
/// Returns an error if nothing would change, `--due` has no recognizable
/// date, or the task does not exist.
pub fn edit(store: &TaskStore, args: EditArgs, format: OutputFormat) -> Result<String, TaskerError> {
    let due_date = if args.clear_due {
        Some(None)
    } else if let Some(text) = &args.due {
        let parsed = parse_task_input_at(text, reference_instant(args.now.as_deref())?);
        let millis = parsed.due_timestamp_millis().ok_or_else(|| {
            TaskerError::InvalidInput(format!("No date or time found in '{text}'"))
        })?;
        Some(Some(millis))
    } else {
        None
    };

    let update = TaskUpdate {
        title: args.title,
        description: args.description.map(Some),
        completed: None,
        color: args.color.map(Some),
        due_date,
        priority: args.priority,
    };

    if update.is_empty() {
        return Err(TaskerError::InvalidInput(
            "Nothing to change (see 'tasker edit --help')".to_string(),
        ));
    }

    let task = store.update_task(args.id, update)?;
    format_task(&task, format)
}

/// Execute the move command.
///
/// # Errors
///
/// Returns an error if the task or target list does not exist.
pub fn move_task(
    store: &TaskStore,
    id: i64,
    position: usize,
    list: Option<&str>,
    format: OutputFormat,
) -> Result<String, TaskerError> {
    let list_id = list
        .map(|name| require_list(store, name))
        .transpose()?
        .map(|list| list.id);

    let task = store.move_task(id, list_id, position)?;
    match format {
        OutputFormat::Json => format_task(&task, format),
        OutputFormat::Pretty => Ok(format!(
            "Moved task {} to position {} in list {}",
            task.id, task.position, task.list_id
        )),
    }
}

/// Execute the rm command.
///
/// # Errors
///
/// Returns an error if the task does not exist.
pub fn remove(store: &TaskStore, id: i64) -> Result<String, TaskerError> {
    let task = store.get_task(id)?;
    store.delete_task(id)?;
    Ok(format!("Deleted task {}: {}", task.id, task.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{NewList, NewTask};

    fn seeded() -> (TaskStore, i64) {
        let store = TaskStore::open_in_memory().unwrap();
        let list = store
            .add_list(NewList {
                name: "Inbox".to_string(),
                ..Default::default()
            })
            .unwrap();
        let task = store
            .add_task(NewTask {
                title: "Buy milk".to_string(),
                list_id: list.id,
                ..Default::default()
            })
            .unwrap();
        (store, task.id)
    }

    fn edit_args(id: i64) -> EditArgs {
        EditArgs {
            id,
            title: None,
            description: None,
            due: None,
            clear_due: false,
            priority: None,
            color: None,
            now: Some("2024-03-11 08:00".to_string()),
        }
    }

    #[test]
    fn test_tasks_hides_completed_when_open() {
        let (store, id) = seeded();
        store.toggle_task_complete(id).unwrap();

        let output = tasks(&store, None, true, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 0);

        let output = tasks(&store, Some("inbox"), false, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
    }

    #[test]
    fn test_tasks_unknown_list() {
        let (store, _) = seeded();
        let err = tasks(&store, Some("Nope"), false, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, TaskerError::NotFound(_)));
    }

    #[test]
    fn test_done_toggles() {
        let (store, id) = seeded();
        assert!(done(&store, id, OutputFormat::Pretty).unwrap().starts_with("Completed"));
        assert!(done(&store, id, OutputFormat::Pretty).unwrap().starts_with("Reopened"));
    }

    #[test]
    fn test_edit_due_uses_parser() {
        let (store, id) = seeded();
        let mut args = edit_args(id);
        args.due = Some("tomorrow at 5pm".to_string());

        edit(&store, args, OutputFormat::Json).unwrap();

        let expected = parse_task_input_at(
            "tomorrow at 5pm",
            reference_instant(Some("2024-03-11 08:00")).unwrap(),
        )
        .due_timestamp_millis();
        assert_eq!(store.get_task(id).unwrap().due_date, expected);
    }

    #[test]
    fn test_edit_due_without_date() {
        let (store, id) = seeded();
        let mut args = edit_args(id);
        args.due = Some("whenever".to_string());

        let err = edit(&store, args, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, TaskerError::InvalidInput(_)));
    }

    #[test]
    fn test_edit_requires_a_change() {
        let (store, id) = seeded();
        let err = edit(&store, edit_args(id), OutputFormat::Json).unwrap_err();
        assert!(matches!(err, TaskerError::InvalidInput(_)));
    }

    #[test]
    fn test_edit_clear_due_and_priority() {
        let (store, id) = seeded();
        store
            .update_task(
                id,
                TaskUpdate {
                    due_date: Some(Some(1)),
                    priority: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        let mut args = edit_args(id);
        args.clear_due = true;
        args.priority = Some(false);
        edit(&store, args, OutputFormat::Json).unwrap();

        let task = store.get_task(id).unwrap();
        assert_eq!(task.due_date, None);
        assert!(!task.priority);
    }

    #[test]
    fn test_remove() {
        let (store, id) = seeded();
        let output = remove(&store, id).unwrap();
        assert!(output.contains("Buy milk"));
        assert!(store.tasks(None).unwrap().is_empty());
    }
}
