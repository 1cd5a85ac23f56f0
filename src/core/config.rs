//! Declarative logger configuration
//!
//! `LoggerConfig` deserializes from any serde format, so applications can keep
//! logger settings next to the rest of their configuration.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Explicit level; absent means "resolve from default and root"
    pub level: Option<LogLevel>,
    /// Format string shared by the console and file sinks
    pub format: Option<String>,
    /// strftime layout for `%(asctime)s`
    pub datefmt: Option<String>,
    pub propagate: bool,
    pub files: Vec<FileSinkConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    /// Defaults to the logger's level
    #[serde(default)]
    pub level: Option<LogLevel>,
}
