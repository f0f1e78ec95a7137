//! Feature implementations for tasker.
//!
//! - Natural language parsing of task input

pub mod nlp;
