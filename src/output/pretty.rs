use std::fmt::Write;

use chrono::{Local, TimeZone};
use colored::Colorize;

use crate::features::nlp::ParsedTaskInput;
use crate::tasks::{Task, TaskGroup, TaskList};

/// Render an epoch-millisecond due date in local time.
fn format_due(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map_or_else(|| millis.to_string(), |due| due.format("%Y-%m-%d %H:%M").to_string())
}

fn task_line(task: &Task) -> String {
    let status_icon = if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    };

    let title = if task.completed {
        task.title.strikethrough().to_string()
    } else {
        task.title.bold().to_string()
    };

    let mut line = format!("{} {} {}", status_icon, format!("#{}", task.id).dimmed(), title);

    if task.priority {
        line.push_str(&format!("  {}", "!".red().bold()));
    }

    if let Some(due) = task.due_date {
        line.push_str(&format!("  {}", format_due(due).yellow()));
    }

    line
}

/// Format tasks as pretty output, one section per list
pub fn format_tasks_pretty(tasks: &[Task], lists: &[TaskList]) -> String {
    if tasks.is_empty() {
        return "Tasks (0 items)\n  No items".to_string();
    }

    let mut output = format!("Tasks ({} items)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for list in lists {
        let in_list: Vec<&Task> = tasks.iter().filter(|t| t.list_id == list.id).collect();
        if in_list.is_empty() {
            continue;
        }
        writeln!(output, "{}", list.name.cyan().bold()).ok();
        for task in in_list {
            writeln!(output, "  {}", task_line(task)).ok();
        }
    }

    // Tasks whose list was not passed in
    let orphans: Vec<&Task> = tasks
        .iter()
        .filter(|t| !lists.iter().any(|l| l.id == t.list_id))
        .collect();
    for task in orphans {
        writeln!(output, "  {}", task_line(task)).ok();
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{}\n", task_line(task));
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "List".dimmed(), task.list_id));
    output.push_str(&format!("  {}: {}\n", "Position".dimmed(), task.position));

    if let Some(description) = &task.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    if let Some(due) = task.due_date {
        output.push_str(&format!("  {}: {}\n", "Due".dimmed(), format_due(due)));
    }

    if task.priority {
        output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), "yes".red()));
    }

    if let Some(color) = &task.color {
        output.push_str(&format!("  {}: {}\n", "Color".dimmed(), color));
    }

    output
}

/// Format lists as pretty output
pub fn format_lists_pretty(lists: &[TaskList], groups: &[TaskGroup]) -> String {
    if lists.is_empty() {
        return "Lists (0)\n  No lists".to_string();
    }

    let mut output = format!("Lists ({})\n", lists.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for list in lists {
        let mut line = format!("{} {}", format!("#{}", list.id).dimmed(), list.name.bold());
        if let Some(group) = list
            .group_id
            .and_then(|id| groups.iter().find(|g| g.id == id))
        {
            line.push_str(&format!("  {}", group.name.magenta()));
        }
        if let Some(description) = &list.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format groups as pretty output
pub fn format_groups_pretty(groups: &[TaskGroup]) -> String {
    if groups.is_empty() {
        return "Groups (0)\n  No groups".to_string();
    }

    let mut output = format!("Groups ({})\n", groups.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for group in groups {
        let mut line = format!("{} {}", format!("#{}", group.id).dimmed(), group.name.bold());
        if let Some(description) = &group.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a parse result (nothing stored).
pub fn format_parsed_pretty(parsed: &ParsedTaskInput) -> String {
    let mut output = format!("{}\n", "Parsed Task (not created)".yellow().bold());
    writeln!(output, "  {} {}", "Title:".cyan().bold(), parsed.title).ok();

    if let Some(due) = parsed.due {
        writeln!(output, "  {} {}", "Due:".cyan(), due.format("%Y-%m-%d %H:%M")).ok();
    }
    if parsed.priority {
        writeln!(output, "  {} yes", "Priority:".red().bold()).ok();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_task(id: i64, list_id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            completed: false,
            list_id,
            color: None,
            position: 0,
            due_date: None,
            priority: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn make_list(id: i64, name: &str) -> TaskList {
        TaskList {
            id,
            name: name.to_string(),
            description: None,
            group_id: None,
            color: None,
            position: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_format_tasks_empty() {
        let output = format_tasks_pretty(&[], &[]);
        assert!(output.contains("0 items"));
    }

    #[test]
    fn test_format_tasks_grouped_by_list() {
        let lists = vec![make_list(1, "Inbox"), make_list(2, "Work")];
        let tasks = vec![make_task(10, 2, "Write report"), make_task(11, 1, "Buy milk")];

        let output = format_tasks_pretty(&tasks, &lists);
        assert!(output.contains("2 items"));
        let inbox = output.find("Inbox").unwrap();
        let milk = output.find("Buy milk").unwrap();
        let work = output.find("Work").unwrap();
        let report = output.find("Write report").unwrap();
        assert!(inbox < milk && milk < work && work < report);
    }

    #[test]
    fn test_format_task_shows_description() {
        let mut task = make_task(3, 1, "Renew passport");
        task.description = Some("bring photos".to_string());
        task.priority = true;

        let output = format_task_pretty(&task);
        assert!(output.contains("Renew passport"));
        assert!(output.contains("bring photos"));
        assert!(output.contains("Priority"));
    }

    #[test]
    fn test_format_parsed() {
        let parsed = ParsedTaskInput {
            title: "Buy milk".to_string(),
            due: NaiveDate::from_ymd_opt(2024, 3, 12).and_then(|d| d.and_hms_opt(17, 0, 0)),
            priority: true,
        };

        let output = format_parsed_pretty(&parsed);
        assert!(output.contains("Buy milk"));
        assert!(output.contains("2024-03-12 17:00"));
        assert!(output.contains("yes"));
    }

    #[test]
    fn test_format_lists_shows_group() {
        let group = TaskGroup {
            id: 5,
            name: "Work".to_string(),
            description: None,
            color: None,
            position: 0,
            created_at: 0,
            updated_at: 0,
        };
        let mut list = make_list(1, "Reports");
        list.group_id = Some(5);

        let output = format_lists_pretty(&[list], &[group]);
        assert!(output.contains("Reports"));
        assert!(output.contains("Work"));
    }
}
