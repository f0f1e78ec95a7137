//! List and group command implementations.

use super::{require_group, require_list};
use crate::cli::args::{GroupCommands, ListCommands, OutputFormat};
use crate::error::TaskerError;
use crate::output::{format_groups, format_lists, to_json};
use crate::storage::TaskStore;
use crate::tasks::{GroupUpdate, ListUpdate, NewGroup, NewList};

/// Execute list subcommands
///
/// # Errors
///
/// Returns an error if a referenced list or group does not exist, or
/// storage fails.
pub fn lists(
    store: &TaskStore,
    cmd: ListCommands,
    format: OutputFormat,
) -> Result<String, TaskerError> {
    match cmd {
        ListCommands::Ls => format_lists(&store.lists()?, &store.groups()?, format),
        ListCommands::Add {
            name,
            group,
            description,
            color,
        } => {
            let group_id = group
                .as_deref()
                .map(|name| require_group(store, name))
                .transpose()?
                .map(|group| group.id);
            let list = store.add_list(NewList {
                name,
                description,
                group_id,
                color,
            })?;
            match format {
                OutputFormat::Json => to_json(&list),
                OutputFormat::Pretty => Ok(format!("Created list {}: {}", list.id, list.name)),
            }
        }
        ListCommands::Rename { id, name } => {
            let list = store.update_list(
                id,
                ListUpdate {
                    name: Some(name),
                    ..Default::default()
                },
            )?;
            match format {
                OutputFormat::Json => to_json(&list),
                OutputFormat::Pretty => Ok(format!("Renamed list {} to {}", list.id, list.name)),
            }
        }
        ListCommands::Regroup { id, group } => {
            let group = group
                .as_deref()
                .map(|name| require_group(store, name))
                .transpose()?;
            let list = store.update_list(
                id,
                ListUpdate {
                    group_id: Some(group.as_ref().map(|g| g.id)),
                    ..Default::default()
                },
            )?;
            match format {
                OutputFormat::Json => to_json(&list),
                OutputFormat::Pretty => Ok(match group {
                    Some(group) => format!("Moved list {} into group {}", list.name, group.name),
                    None => format!("Moved list {} out of its group", list.name),
                }),
            }
        }
        ListCommands::Rm { id } => {
            let list = store.get_list(id)?;
            let task_count = store.tasks(Some(id))?.len();
            store.delete_list(id)?;
            Ok(format!(
                "Deleted list {} and {task_count} task(s)",
                list.name
            ))
        }
    }
}

/// Execute group subcommands
///
/// # Errors
///
/// Returns an error if the group does not exist or storage fails.
pub fn groups(
    store: &TaskStore,
    cmd: GroupCommands,
    format: OutputFormat,
) -> Result<String, TaskerError> {
    match cmd {
        GroupCommands::Ls => format_groups(&store.groups()?, format),
        GroupCommands::Add {
            name,
            description,
            color,
        } => {
            let group = store.add_group(NewGroup {
                name,
                description,
                color,
            })?;
            match format {
                OutputFormat::Json => to_json(&group),
                OutputFormat::Pretty => Ok(format!("Created group {}: {}", group.id, group.name)),
            }
        }
        GroupCommands::Rename { id, name } => {
            let group = store.update_group(
                id,
                GroupUpdate {
                    name: Some(name),
                    ..Default::default()
                },
            )?;
            match format {
                OutputFormat::Json => to_json(&group),
                OutputFormat::Pretty => {
                    Ok(format!("Renamed group {} to {}", group.id, group.name))
                }
            }
        }
        GroupCommands::Rm { id } => {
            let group = store.get_group(id)?;
            store.delete_group(id)?;
            Ok(format!("Deleted group {}; its lists are now ungrouped", group.name))
        }
    }
}
