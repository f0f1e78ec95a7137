//! Task, list and group persistence.
//!
//! Positions are zero-based and dense within their container: tasks within a
//! list, lists within a group (or among ungrouped lists), groups globally.
//! New items are appended; deletes and moves renumber the affected container.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::Database;
use crate::error::TaskerError;
use crate::tasks::{
    AppData, GroupUpdate, ListUpdate, NewGroup, NewList, NewTask, Task, TaskGroup, TaskList,
    TaskUpdate,
};

const GROUP_COLUMNS: &str = "id, name, description, color, position, created_at, updated_at";
const LIST_COLUMNS: &str =
    "id, name, description, group_id, color, position, created_at, updated_at";
const TASK_COLUMNS: &str = "id, title, description, completed, list_id, color, position, \
                            due_date, priority, created_at, updated_at";

/// Storage for groups, lists and tasks.
pub struct TaskStore {
    db: Database,
}

impl TaskStore {
    /// Create a store over an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_in_memory() -> Result<Self, TaskerError> {
        Database::open_in_memory().map(Self::new)
    }

    fn conn(&self) -> &Connection {
        self.db.connection()
    }

    // ===========
    // Groups
    // ===========

    /// Create a group at the end of the group ordering.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the insert fails.
    pub fn add_group(&self, group: NewGroup) -> Result<TaskGroup, TaskerError> {
        let name = require_name(&group.name, "Group")?;
        let conn = self.conn();
        let now = now_millis();

        let position: i64 =
            conn.query_row("SELECT COUNT(*) FROM task_groups", [], |row| row.get(0))?;
        conn.execute(
            "INSERT INTO task_groups (name, description, color, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![name, group.description, group.color, position, now],
        )
        .map_err(|e| TaskerError::Database(format!("Failed to insert group: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!(id, position, "added group");
        self.get_group(id)
    }

    /// Get a group by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such group exists.
    pub fn get_group(&self, id: i64) -> Result<TaskGroup, TaskerError> {
        self.conn()
            .query_row(
                &format!("SELECT {GROUP_COLUMNS} FROM task_groups WHERE id = ?1"),
                [id],
                row_to_group,
            )
            .optional()?
            .ok_or_else(|| TaskerError::NotFound(format!("group {id}")))
    }

    /// Find a group by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_group_by_name(&self, name: &str) -> Result<Option<TaskGroup>, TaskerError> {
        Ok(self
            .conn()
            .query_row(
                &format!(
                    "SELECT {GROUP_COLUMNS} FROM task_groups
                     WHERE name = ?1 COLLATE NOCASE ORDER BY id LIMIT 1"
                ),
                [name.trim()],
                row_to_group,
            )
            .optional()?)
    }

    /// All groups in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn groups(&self) -> Result<Vec<TaskGroup>, TaskerError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {GROUP_COLUMNS} FROM task_groups ORDER BY position, id"
        ))?;
        let groups = stmt
            .query_map([], row_to_group)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    /// Apply a partial update to a group.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown group, or `InvalidInput` for an
    /// empty name.
    pub fn update_group(&self, id: i64, update: GroupUpdate) -> Result<TaskGroup, TaskerError> {
        let mut group = self.get_group(id)?;
        update.apply_to(&mut group);
        group.name = require_name(&group.name, "Group")?;
        group.updated_at = now_millis();

        self.conn()
            .execute(
                "UPDATE task_groups SET name = ?1, description = ?2, color = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![group.name, group.description, group.color, group.updated_at, id],
            )
            .map_err(|e| TaskerError::Database(format!("Failed to update group: {e}")))?;

        debug!(id, "updated group");
        Ok(group)
    }

    /// Delete a group. Its lists are kept and become ungrouped.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown group.
    pub fn delete_group(&self, id: i64) -> Result<(), TaskerError> {
        let tx = self.conn().unchecked_transaction()?;

        let deleted = tx.execute("DELETE FROM task_groups WHERE id = ?1", [id])?;
        if deleted == 0 {
            return Err(TaskerError::NotFound(format!("group {id}")));
        }
        renumber_groups(&tx)?;
        renumber_lists(&tx, None)?;

        tx.commit()?;
        debug!(id, "deleted group");
        Ok(())
    }

    // ===========
    // Lists
    // ===========

    /// Create a list at the end of its group.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, the group does not exist, or
    /// the insert fails.
    pub fn add_list(&self, list: NewList) -> Result<TaskList, TaskerError> {
        let name = require_name(&list.name, "List")?;
        if let Some(group_id) = list.group_id {
            self.get_group(group_id)?;
        }
        let conn = self.conn();
        let now = now_millis();

        let position = count_lists_in_group(conn, list.group_id)?;
        conn.execute(
            "INSERT INTO task_lists
             (name, description, group_id, color, position, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![name, list.description, list.group_id, list.color, position, now],
        )
        .map_err(|e| TaskerError::Database(format!("Failed to insert list: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!(id, position, "added list");
        self.get_list(id)
    }

    /// Get a list by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such list exists.
    pub fn get_list(&self, id: i64) -> Result<TaskList, TaskerError> {
        self.conn()
            .query_row(
                &format!("SELECT {LIST_COLUMNS} FROM task_lists WHERE id = ?1"),
                [id],
                row_to_list,
            )
            .optional()?
            .ok_or_else(|| TaskerError::NotFound(format!("list {id}")))
    }

    /// Find a list by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_list_by_name(&self, name: &str) -> Result<Option<TaskList>, TaskerError> {
        Ok(self
            .conn()
            .query_row(
                &format!(
                    "SELECT {LIST_COLUMNS} FROM task_lists
                     WHERE name = ?1 COLLATE NOCASE ORDER BY id LIMIT 1"
                ),
                [name.trim()],
                row_to_list,
            )
            .optional()?)
    }

    /// Get the list called `name`, creating an ungrouped one if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or storage fails.
    pub fn ensure_list(&self, name: &str) -> Result<TaskList, TaskerError> {
        if let Some(list) = self.find_list_by_name(name)? {
            return Ok(list);
        }
        self.add_list(NewList {
            name: name.to_string(),
            ..Default::default()
        })
    }

    /// All lists, ungrouped first, then by group and position.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lists(&self) -> Result<Vec<TaskList>, TaskerError> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM task_lists
             ORDER BY group_id IS NOT NULL, group_id, position, id"
        ))?;
        let lists = stmt
            .query_map([], row_to_list)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    /// Apply a partial update to a list.
    ///
    /// Moving a list to another group appends it there.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown list or target group.
    pub fn update_list(&self, id: i64, update: ListUpdate) -> Result<TaskList, TaskerError> {
        let mut list = self.get_list(id)?;
        let old_group = list.group_id;
        update.apply_to(&mut list);
        list.name = require_name(&list.name, "List")?;
        list.updated_at = now_millis();

        let tx = self.conn().unchecked_transaction()?;
        if list.group_id != old_group {
            if let Some(group_id) = list.group_id {
                self.get_group(group_id)?;
            }
            list.position = count_lists_in_group(&tx, list.group_id)?;
        }

        tx.execute(
            "UPDATE task_lists SET name = ?1, description = ?2, group_id = ?3, color = ?4,
             position = ?5, updated_at = ?6 WHERE id = ?7",
            params![
                list.name,
                list.description,
                list.group_id,
                list.color,
                list.position,
                list.updated_at,
                id
            ],
        )
        .map_err(|e| TaskerError::Database(format!("Failed to update list: {e}")))?;

        if list.group_id != old_group {
            renumber_lists(&tx, old_group)?;
        }
        tx.commit()?;

        debug!(id, "updated list");
        Ok(list)
    }

    /// Delete a list together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown list.
    pub fn delete_list(&self, id: i64) -> Result<(), TaskerError> {
        let list = self.get_list(id)?;
        let tx = self.conn().unchecked_transaction()?;

        tx.execute("DELETE FROM task_lists WHERE id = ?1", [id])?;
        renumber_lists(&tx, list.group_id)?;

        tx.commit()?;
        debug!(id, "deleted list and its tasks");
        Ok(())
    }

    // ===========
    // Tasks
    // ===========

    /// Create a task at the end of its list.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is empty, the list does not exist, or
    /// the insert fails.
    pub fn add_task(&self, task: NewTask) -> Result<Task, TaskerError> {
        let title = require_name(&task.title, "Task title")?;
        self.get_list(task.list_id)?;
        let conn = self.conn();
        let now = now_millis();

        let position: i64 = conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE list_id = ?1",
            [task.list_id],
            |row| row.get(0),
        )?;
        conn.execute(
            "INSERT INTO tasks
             (title, description, completed, list_id, color, position, due_date, priority,
              created_at, updated_at)
             VALUES (?1, ?2, 0, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                title,
                task.description,
                task.list_id,
                task.color,
                position,
                task.due_date,
                task.priority,
                now
            ],
        )
        .map_err(|e| TaskerError::Database(format!("Failed to insert task: {e}")))?;

        let id = conn.last_insert_rowid();
        debug!(id, list_id = task.list_id, position, "added task");
        self.get_task(id)
    }

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such task exists.
    pub fn get_task(&self, id: i64) -> Result<Task, TaskerError> {
        self.conn()
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                [id],
                row_to_task,
            )
            .optional()?
            .ok_or_else(|| TaskerError::NotFound(format!("task {id}")))
    }

    /// Tasks of one list, or of every list, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn tasks(&self, list_id: Option<i64>) -> Result<Vec<Task>, TaskerError> {
        let conn = self.conn();
        let tasks = if let Some(list_id) = list_id {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE list_id = ?1 ORDER BY position, id"
            ))?;
            let rows = stmt.query_map([list_id], row_to_task)?;
            rows.collect::<Result<Vec<_>, _>>()?
        } else {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks ORDER BY list_id, position, id"
            ))?;
            let rows = stmt.query_map([], row_to_task)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        Ok(tasks)
    }

    /// Apply a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task, or `InvalidInput` for an
    /// empty title.
    pub fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Task, TaskerError> {
        let mut task = self.get_task(id)?;
        update.apply_to(&mut task);
        task.title = require_name(&task.title, "Task title")?;
        task.updated_at = now_millis();

        self.conn()
            .execute(
                "UPDATE tasks SET title = ?1, description = ?2, completed = ?3, color = ?4,
                 due_date = ?5, priority = ?6, updated_at = ?7 WHERE id = ?8",
                params![
                    task.title,
                    task.description,
                    task.completed,
                    task.color,
                    task.due_date,
                    task.priority,
                    task.updated_at,
                    id
                ],
            )
            .map_err(|e| TaskerError::Database(format!("Failed to update task: {e}")))?;

        debug!(id, "updated task");
        Ok(task)
    }

    /// Flip a task between open and completed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task.
    pub fn toggle_task_complete(&self, id: i64) -> Result<Task, TaskerError> {
        let task = self.get_task(id)?;
        self.update_task(
            id,
            TaskUpdate {
                completed: Some(!task.completed),
                ..Default::default()
            },
        )
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task.
    pub fn delete_task(&self, id: i64) -> Result<(), TaskerError> {
        let task = self.get_task(id)?;
        let tx = self.conn().unchecked_transaction()?;

        tx.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        renumber_tasks(&tx, task.list_id)?;

        tx.commit()?;
        debug!(id, "deleted task");
        Ok(())
    }

    /// Move a task to `position` within `list_id` (its own list when `None`).
    ///
    /// Positions past the end append. Both the source and target lists are
    /// renumbered.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown task or target list.
    pub fn move_task(
        &self,
        id: i64,
        list_id: Option<i64>,
        position: usize,
    ) -> Result<Task, TaskerError> {
        let task = self.get_task(id)?;
        let target = list_id.unwrap_or(task.list_id);
        self.get_list(target)?;

        let tx = self.conn().unchecked_transaction()?;

        let mut order: Vec<i64> = task_ids_in_list(&tx, target)?
            .into_iter()
            .filter(|other| *other != id)
            .collect();
        order.insert(position.min(order.len()), id);

        tx.execute(
            "UPDATE tasks SET list_id = ?1, updated_at = ?2 WHERE id = ?3",
            params![target, now_millis(), id],
        )?;
        write_task_positions(&tx, &order)?;
        if target != task.list_id {
            renumber_tasks(&tx, task.list_id)?;
        }

        tx.commit()?;
        debug!(id, from = task.list_id, to = target, position, "moved task");
        self.get_task(id)
    }

    // ===========
    // Snapshots
    // ===========

    /// Load every group, list and task.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn load(&self) -> Result<AppData, TaskerError> {
        Ok(AppData {
            tasks: self.tasks(None)?,
            lists: self.lists()?,
            groups: self.groups()?,
        })
    }

    /// Replace all stored data with `data`, keeping its IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is inconsistent (e.g. a task refers
    /// to a missing list); nothing is changed in that case.
    pub fn import(&self, data: &AppData) -> Result<(), TaskerError> {
        let tx = self.conn().unchecked_transaction()?;
        clear_all(&tx)?;

        for group in &data.groups {
            tx.execute(
                &format!(
                    "INSERT INTO task_groups ({GROUP_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                params![
                    group.id,
                    group.name,
                    group.description,
                    group.color,
                    group.position,
                    group.created_at,
                    group.updated_at
                ],
            )
            .map_err(|e| TaskerError::Database(format!("Failed to import group {}: {e}", group.id)))?;
        }

        for list in &data.lists {
            tx.execute(
                &format!(
                    "INSERT INTO task_lists ({LIST_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                params![
                    list.id,
                    list.name,
                    list.description,
                    list.group_id,
                    list.color,
                    list.position,
                    list.created_at,
                    list.updated_at
                ],
            )
            .map_err(|e| TaskerError::Database(format!("Failed to import list {}: {e}", list.id)))?;
        }

        for task in &data.tasks {
            tx.execute(
                &format!(
                    "INSERT INTO tasks ({TASK_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                params![
                    task.id,
                    task.title,
                    task.description,
                    task.completed,
                    task.list_id,
                    task.color,
                    task.position,
                    task.due_date,
                    task.priority,
                    task.created_at,
                    task.updated_at
                ],
            )
            .map_err(|e| TaskerError::Database(format!("Failed to import task {}: {e}", task.id)))?;
        }

        tx.commit()?;
        info!(
            groups = data.groups.len(),
            lists = data.lists.len(),
            tasks = data.tasks.len(),
            "imported data"
        );
        Ok(())
    }

    /// Serialize all data as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or serialization fails.
    pub fn export_json(&self) -> Result<String, TaskerError> {
        Ok(serde_json::to_string_pretty(&self.load()?)?)
    }

    /// Replace all data with a JSON snapshot produced by [`Self::export_json`].
    ///
    /// # Errors
    ///
    /// Returns `Parse` for malformed JSON, or a storage error.
    pub fn import_json(&self, json: &str) -> Result<AppData, TaskerError> {
        let data: AppData = serde_json::from_str(json)?;
        self.import(&data)?;
        Ok(data)
    }

    /// Delete every group, list and task.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletes fail.
    pub fn clear(&self) -> Result<(), TaskerError> {
        let tx = self.conn().unchecked_transaction()?;
        clear_all(&tx)?;
        tx.commit()?;
        info!("cleared all data");
        Ok(())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn require_name(name: &str, what: &str) -> Result<String, TaskerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskerError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn clear_all(conn: &Connection) -> Result<(), TaskerError> {
    conn.execute_batch(
        "DELETE FROM tasks;
         DELETE FROM task_lists;
         DELETE FROM task_groups;",
    )
    .map_err(|e| TaskerError::Database(format!("Failed to clear data: {e}")))
}

fn count_lists_in_group(conn: &Connection, group_id: Option<i64>) -> Result<i64, TaskerError> {
    // IS matches NULL for ungrouped lists
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM task_lists WHERE group_id IS ?1",
        [group_id],
        |row| row.get(0),
    )?)
}

fn task_ids_in_list(conn: &Connection, list_id: i64) -> Result<Vec<i64>, TaskerError> {
    let mut stmt =
        conn.prepare("SELECT id FROM tasks WHERE list_id = ?1 ORDER BY position, id")?;
    let ids = stmt
        .query_map([list_id], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;
    Ok(ids)
}

fn write_task_positions(conn: &Connection, order: &[i64]) -> Result<(), TaskerError> {
    let mut stmt = conn.prepare("UPDATE tasks SET position = ?1 WHERE id = ?2")?;
    for (position, id) in (0_i64..).zip(order) {
        stmt.execute(params![position, id])?;
    }
    Ok(())
}

fn renumber_tasks(conn: &Connection, list_id: i64) -> Result<(), TaskerError> {
    let order = task_ids_in_list(conn, list_id)?;
    write_task_positions(conn, &order)
}

fn renumber_lists(conn: &Connection, group_id: Option<i64>) -> Result<(), TaskerError> {
    let mut stmt =
        conn.prepare("SELECT id FROM task_lists WHERE group_id IS ?1 ORDER BY position, id")?;
    let ids = stmt
        .query_map([group_id], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    let mut update = conn.prepare("UPDATE task_lists SET position = ?1 WHERE id = ?2")?;
    for (position, id) in (0_i64..).zip(&ids) {
        update.execute(params![position, id])?;
    }
    Ok(())
}

fn renumber_groups(conn: &Connection) -> Result<(), TaskerError> {
    let mut stmt = conn.prepare("SELECT id FROM task_groups ORDER BY position, id")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    let mut update = conn.prepare("UPDATE task_groups SET position = ?1 WHERE id = ?2")?;
    for (position, id) in (0_i64..).zip(&ids) {
        update.execute(params![position, id])?;
    }
    Ok(())
}

fn row_to_group(row: &Row<'_>) -> rusqlite::Result<TaskGroup> {
    Ok(TaskGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        color: row.get(3)?,
        position: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn row_to_list(row: &Row<'_>) -> rusqlite::Result<TaskList> {
    Ok(TaskList {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        group_id: row.get(3)?,
        color: row.get(4)?,
        position: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        list_id: row.get(4)?,
        color: row.get(5)?,
        position: row.get(6)?,
        due_date: row.get(7)?,
        priority: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TaskStore {
        TaskStore::open_in_memory().unwrap()
    }

    fn list(store: &TaskStore, name: &str) -> TaskList {
        store
            .add_list(NewList {
                name: name.to_string(),
                ..Default::default()
            })
            .unwrap()
    }

    fn task(store: &TaskStore, list_id: i64, title: &str) -> Task {
        store
            .add_task(NewTask {
                title: title.to_string(),
                list_id,
                ..Default::default()
            })
            .unwrap()
    }

    fn titles(store: &TaskStore, list_id: i64) -> Vec<String> {
        store
            .tasks(Some(list_id))
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect()
    }

    // ===========
    // Group Tests
    // ===========

    #[test]
    fn test_add_groups_appends_positions() {
        let store = store();
        let a = store.add_group(NewGroup { name: "Work".into(), ..Default::default() }).unwrap();
        let b = store.add_group(NewGroup { name: "Home".into(), ..Default::default() }).unwrap();

        assert_eq!(a.position, 0);
        assert_eq!(b.position, 1);
        assert_eq!(store.groups().unwrap().len(), 2);
    }

    #[test]
    fn test_add_group_rejects_empty_name() {
        let err = store().add_group(NewGroup::default()).unwrap_err();
        assert!(matches!(err, TaskerError::InvalidInput(_)));
    }

    #[test]
    fn test_delete_group_ungroups_lists() {
        let store = store();
        let group = store.add_group(NewGroup { name: "Work".into(), ..Default::default() }).unwrap();
        let grouped = store
            .add_list(NewList {
                name: "Reports".into(),
                group_id: Some(group.id),
                ..Default::default()
            })
            .unwrap();
        let loose = list(&store, "Inbox");
        assert_eq!(grouped.position, 0);
        assert_eq!(loose.position, 0);

        store.delete_group(group.id).unwrap();

        assert!(store.groups().unwrap().is_empty());
        let reports = store.get_list(grouped.id).unwrap();
        assert_eq!(reports.group_id, None);
        // Ungrouped lists are renumbered without collisions
        let mut positions: Vec<i64> = store.lists().unwrap().iter().map(|l| l.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn test_rename_group() {
        let store = store();
        let group = store.add_group(NewGroup { name: "Wrk".into(), ..Default::default() }).unwrap();
        let renamed = store
            .update_group(group.id, GroupUpdate { name: Some("Work".into()), ..Default::default() })
            .unwrap();
        assert_eq!(renamed.name, "Work");
        assert_eq!(store.get_group(group.id).unwrap().name, "Work");
    }

    #[test]
    fn test_missing_group() {
        let store = store();
        assert!(matches!(store.get_group(42), Err(TaskerError::NotFound(_))));
        assert!(matches!(store.delete_group(42), Err(TaskerError::NotFound(_))));
        let err = store
            .add_list(NewList { name: "x".into(), group_id: Some(42), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, TaskerError::NotFound(_)));
    }

    // ===========
    // List Tests
    // ===========

    #[test]
    fn test_list_positions_are_per_group() {
        let store = store();
        let group = store.add_group(NewGroup { name: "Work".into(), ..Default::default() }).unwrap();
        let a = list(&store, "Inbox");
        let b = store
            .add_list(NewList { name: "Q1".into(), group_id: Some(group.id), ..Default::default() })
            .unwrap();
        let c = list(&store, "Errands");

        assert_eq!(a.position, 0);
        assert_eq!(b.position, 0);
        assert_eq!(c.position, 1);
    }

    #[test]
    fn test_find_and_ensure_list() {
        let store = store();
        let inbox = list(&store, "Inbox");

        let found = store.find_list_by_name("inbox").unwrap().unwrap();
        assert_eq!(found.id, inbox.id);

        let ensured = store.ensure_list("INBOX").unwrap();
        assert_eq!(ensured.id, inbox.id);

        let created = store.ensure_list("Errands").unwrap();
        assert_ne!(created.id, inbox.id);
        assert_eq!(store.lists().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_list_removes_its_tasks() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let other = list(&store, "Other");
        task(&store, inbox.id, "a");
        task(&store, inbox.id, "b");
        let kept = task(&store, other.id, "c");

        store.delete_list(inbox.id).unwrap();

        let remaining = store.tasks(None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        assert_eq!(store.get_list(other.id).unwrap().position, 0);
    }

    #[test]
    fn test_move_list_between_groups() {
        let store = store();
        let group = store.add_group(NewGroup { name: "Work".into(), ..Default::default() }).unwrap();
        let a = list(&store, "A");
        let b = list(&store, "B");

        let moved = store
            .update_list(a.id, ListUpdate { group_id: Some(Some(group.id)), ..Default::default() })
            .unwrap();
        assert_eq!(moved.group_id, Some(group.id));
        assert_eq!(moved.position, 0);
        assert_eq!(store.get_list(b.id).unwrap().position, 0);
    }

    // ===========
    // Task Tests
    // ===========

    #[test]
    fn test_add_task_appends_position() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let first = task(&store, inbox.id, "first");
        let second = task(&store, inbox.id, "second");

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert!(!first.completed);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn test_add_task_keeps_due_date_and_priority() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let created = store
            .add_task(NewTask {
                title: "Buy milk".into(),
                list_id: inbox.id,
                due_date: Some(1_710_176_400_000),
                priority: true,
                ..Default::default()
            })
            .unwrap();

        let loaded = store.get_task(created.id).unwrap();
        assert_eq!(loaded.due_date, Some(1_710_176_400_000));
        assert!(loaded.priority);
    }

    #[test]
    fn test_add_task_requires_list_and_title() {
        let store = store();
        let err = store
            .add_task(NewTask { title: "x".into(), list_id: 99, ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, TaskerError::NotFound(_)));

        let inbox = list(&store, "Inbox");
        let err = store
            .add_task(NewTask { title: "  ".into(), list_id: inbox.id, ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, TaskerError::InvalidInput(_)));
    }

    #[test]
    fn test_toggle_task_complete() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let created = task(&store, inbox.id, "a");

        assert!(store.toggle_task_complete(created.id).unwrap().completed);
        assert!(!store.toggle_task_complete(created.id).unwrap().completed);
    }

    #[test]
    fn test_update_task_partial() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let created = task(&store, inbox.id, "a");

        let updated = store
            .update_task(
                created.id,
                TaskUpdate {
                    description: Some(Some("details".into())),
                    due_date: Some(Some(5)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "a");
        assert_eq!(updated.description.as_deref(), Some("details"));
        assert_eq!(store.get_task(created.id).unwrap().due_date, Some(5));

        let cleared = store
            .update_task(created.id, TaskUpdate { due_date: Some(None), ..Default::default() })
            .unwrap();
        assert_eq!(cleared.due_date, None);
    }

    #[test]
    fn test_delete_task_renumbers() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let a = task(&store, inbox.id, "a");
        task(&store, inbox.id, "b");
        task(&store, inbox.id, "c");

        store.delete_task(a.id).unwrap();
        let positions: Vec<i64> = store.tasks(Some(inbox.id)).unwrap().iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1]);

        let d = task(&store, inbox.id, "d");
        assert_eq!(d.position, 2);
        assert!(matches!(store.delete_task(a.id), Err(TaskerError::NotFound(_))));
    }

    #[test]
    fn test_move_task_within_list() {
        let store = store();
        let inbox = list(&store, "Inbox");
        task(&store, inbox.id, "a");
        task(&store, inbox.id, "b");
        let c = task(&store, inbox.id, "c");

        let moved = store.move_task(c.id, None, 0).unwrap();
        assert_eq!(moved.position, 0);
        assert_eq!(titles(&store, inbox.id), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_move_task_across_lists() {
        let store = store();
        let inbox = list(&store, "Inbox");
        let work = list(&store, "Work");
        let a = task(&store, inbox.id, "a");
        task(&store, inbox.id, "b");
        task(&store, work.id, "x");

        let moved = store.move_task(a.id, Some(work.id), 100).unwrap();
        assert_eq!(moved.list_id, work.id);
        assert_eq!(moved.position, 1);
        assert_eq!(titles(&store, work.id), vec!["x", "a"]);
        assert_eq!(titles(&store, inbox.id), vec!["b"]);
        assert_eq!(store.tasks(Some(inbox.id)).unwrap()[0].position, 0);
    }

    // ===========
    // Snapshot Tests
    // ===========

    #[test]
    fn test_export_import_json() {
        let source = store();
        let group = source.add_group(NewGroup { name: "Work".into(), ..Default::default() }).unwrap();
        let reports = source
            .add_list(NewList { name: "Reports".into(), group_id: Some(group.id), ..Default::default() })
            .unwrap();
        task(&source, reports.id, "Q1 report");

        let json = source.export_json().unwrap();
        assert!(json.contains("\"listId\""));

        let target = store();
        let inbox = list(&target, "Stale");
        task(&target, inbox.id, "stale task");

        let imported = target.import_json(&json).unwrap();
        assert_eq!(imported.tasks.len(), 1);
        assert_eq!(target.load().unwrap(), source.load().unwrap());
    }

    #[test]
    fn test_import_inconsistent_data_changes_nothing() {
        let store = store();
        let inbox = list(&store, "Inbox");
        task(&store, inbox.id, "keep me");

        let json = r#"{"tasks":[{"id":1,"title":"orphan","listId":77,"position":0,"createdAt":0,"updatedAt":0}]}"#;
        assert!(store.import_json(json).is_err());
        assert_eq!(titles(&store, inbox.id), vec!["keep me"]);
    }

    #[test]
    fn test_import_malformed_json() {
        let err = store().import_json("not json").unwrap_err();
        assert!(matches!(err, TaskerError::Parse(_)));
    }

    #[test]
    fn test_clear() {
        let store = store();
        let inbox = list(&store, "Inbox");
        task(&store, inbox.id, "a");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
