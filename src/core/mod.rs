//! Core abstractions for tasker.
//!
//! This module provides calendar utilities shared by the parser and the CLI.

mod datetime;

pub use datetime::{
    add_days, add_months_overflowing, at_time_of_day, days_until_weekday,
    local_timestamp_millis, next_weekday_after, overflowing_date, parse_reference_instant,
    resolve_local, start_of_day, upcoming_saturday,
};
