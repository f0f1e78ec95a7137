//! Command-line interface for tasker.

pub mod args;
pub mod commands;
