use serde::{Deserialize, Serialize};

/// A named collection of lists, shown as a section in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub position: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Owning group; ungrouped lists have `None`.
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
    pub position: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub list_id: i64,
    #[serde(default)]
    pub color: Option<String>,
    /// Zero-based position within the owning list.
    pub position: i64,
    /// Epoch milliseconds.
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub priority: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Full snapshot of stored data, used for export and import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub lists: Vec<TaskList>,
    #[serde(default)]
    pub groups: Vec<TaskGroup>,
}

impl AppData {
    /// Check if the snapshot holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.lists.is_empty() && self.groups.is_empty()
    }
}

/// Fields for creating a group.
#[derive(Debug, Clone, Default)]
pub struct NewGroup {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Fields for creating a list.
#[derive(Debug, Clone, Default)]
pub struct NewList {
    pub name: String,
    pub description: Option<String>,
    pub group_id: Option<i64>,
    pub color: Option<String>,
}

/// Fields for creating a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub list_id: i64,
    pub color: Option<String>,
    pub due_date: Option<i64>,
    pub priority: bool,
}

/// Partial update of a group. `None` leaves a field unchanged; for
/// clearable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

/// Partial update of a list.
#[derive(Debug, Clone, Default)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub group_id: Option<Option<i64>>,
    pub color: Option<Option<String>>,
}

/// Partial update of a task.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub color: Option<Option<String>>,
    pub due_date: Option<Option<i64>>,
    pub priority: Option<bool>,
}

impl TaskUpdate {
    /// Check if the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.color.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
    }

    pub(crate) fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(color) = self.color {
            task.color = color;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
    }
}

impl ListUpdate {
    pub(crate) fn apply_to(self, list: &mut TaskList) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(description) = self.description {
            list.description = description;
        }
        if let Some(group_id) = self.group_id {
            list.group_id = group_id;
        }
        if let Some(color) = self.color {
            list.color = color;
        }
    }
}

impl GroupUpdate {
    pub(crate) fn apply_to(self, group: &mut TaskGroup) {
        if let Some(name) = self.name {
            group.name = name;
        }
        if let Some(description) = self.description {
            group.description = description;
        }
        if let Some(color) = self.color {
            group.color = color;
        }
    }
}
