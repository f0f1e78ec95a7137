//! Storage layer for tasker.
//!
//! This module provides SQLite-based persistence for task groups, task
//! lists and tasks, plus JSON snapshot export and import.

mod database;
mod migrations;
mod store;

pub use database::Database;
pub use store::TaskStore;
