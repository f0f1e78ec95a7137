//! tasker - a personal task manager with natural language due dates
//!
//! This crate provides the task-input parser that turns text such as
//! "Buy milk tomorrow at 5pm!" into a title, a due date and a priority flag,
//! together with local SQLite storage for tasks, lists and groups.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tasks;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TaskerError;
pub use features::nlp::{parse_task_input, parse_task_input_at, ParsedTaskInput};
pub use storage::TaskStore;
