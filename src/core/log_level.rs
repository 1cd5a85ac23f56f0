//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Level used when neither an explicit level nor a more verbose root level applies
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Severity of a record, ordered from most to least verbose.
///
/// The discriminants follow the numbering the wider logging ecosystem uses,
/// so `LogLevel::Warning.as_u8() == 30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum LogLevel {
    NotSet = 0,
    Debug = 10,
    #[default]
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::NotSet,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::NotSet => "NOTSET",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    #[inline]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_u8() == value)
    }

    /// Terminal color for the level label, with a flag for the bright style.
    ///
    /// `NotSet` records are never colored.
    pub fn color_code(&self) -> Option<(colored::Color, bool)> {
        use colored::Color::*;
        match self {
            LogLevel::NotSet => None,
            LogLevel::Debug => Some((Magenta, false)),
            LogLevel::Info => Some((Green, false)),
            LogLevel::Warning => Some((Yellow, false)),
            LogLevel::Error => Some((Red, false)),
            LogLevel::Critical => Some((Red, true)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NOTSET" => Ok(LogLevel::NotSet),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            other => other
                .parse::<u8>()
                .ok()
                .and_then(LogLevel::from_u8)
                .ok_or_else(|| LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}
