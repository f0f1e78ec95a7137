//! Task, list and group data model.

pub mod types;

pub use types::*;
