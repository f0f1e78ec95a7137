//! Configuration management for tasker.
//!
//! This module handles loading and saving configuration from `~/.tasker/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, LoggingConfig};
