//! Parse and add command implementations.
//!
//! These implement `tasker parse` and `tasker add` for natural language task entry.

use std::fmt::Write;

use colored::Colorize;
use serde_json::json;

use super::reference_instant;
use crate::cli::args::{AddArgs, OutputFormat, ParseArgs};
use crate::error::TaskerError;
use crate::features::nlp::parse_task_input_at;
use crate::output::format_parsed;
use crate::storage::TaskStore;
use crate::tasks::NewTask;

/// Execute the parse command.
///
/// # Errors
///
/// Returns an error if `--now` is malformed or output formatting fails.
pub fn parse(args: &ParseArgs, format: OutputFormat) -> Result<String, TaskerError> {
    let now = reference_instant(args.now.as_deref())?;
    let parsed = parse_task_input_at(&args.text, now);
    format_parsed(&parsed, format)
}

/// Execute the add command.
///
/// The task goes into `--list` if given, else `default_list`. Either list is
/// created when missing.
///
/// # Errors
///
/// Returns an error if nothing is left for a title, `--now` is malformed, or
/// storage fails.
pub fn add(
    store: &TaskStore,
    args: AddArgs,
    default_list: &str,
    format: OutputFormat,
) -> Result<String, TaskerError> {
    let now = reference_instant(args.now.as_deref())?;
    let parsed = parse_task_input_at(&args.text, now);

    if parsed.title.is_empty() {
        return Err(TaskerError::InvalidInput(format!(
            "No task title left in '{}'",
            args.text
        )));
    }

    let list = store.ensure_list(args.list.as_deref().unwrap_or(default_list))?;
    let task = store.add_task(NewTask {
        title: parsed.title.clone(),
        description: args.description,
        list_id: list.id,
        color: args.color,
        due_date: parsed.due_timestamp_millis(),
        priority: parsed.priority,
    })?;

    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "list": list.name,
                "task": task,
            });
            serde_json::to_string_pretty(&output).map_err(TaskerError::Parse)
        }
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} (ID: {})\n",
                "Created:".green().bold(),
                task.title,
                task.id.to_string().dimmed()
            );

            writeln!(output, "  {} {}", "List:".cyan(), list.name).ok();
            if let Some(due) = parsed.due {
                writeln!(output, "  {} {}", "Due:".cyan(), due.format("%Y-%m-%d %H:%M")).ok();
            }
            if parsed.priority {
                writeln!(output, "  {} yes", "Priority:".red().bold()).ok();
            }

            Ok(output)
        }
    }
}
