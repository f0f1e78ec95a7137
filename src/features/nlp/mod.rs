//! Natural language parsing for task entry.
//!
//! This module provides parsing for free-text task input like:
//! - "Buy milk tomorrow at 5pm!"
//! - "call mom 22nd of november"
//! - "urgent renew passport in 2 months"

mod parser;
mod rules;

pub use parser::{parse_task_input, parse_task_input_at, ParsedTaskInput};
pub use rules::{DateMatch, DateRule, DATE_RULES};
