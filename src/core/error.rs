//! Error types for the logger system

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// File sink could not be opened for appending
    #[error("Cannot open log file '{}': {source}", path.display())]
    FileSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Percent-style placeholders did not match the supplied arguments
    #[error("Message formatting failed: {message}")]
    Format { message: String },

    /// Format string passed to a formatter is malformed
    #[error("Invalid format string {format:?}: {message}")]
    InvalidFormat { format: String, message: String },

    /// Unknown level name or number
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// A logger with this name is already registered
    #[error("Logger '{name}' is already registered")]
    AlreadyRegistered { name: String },
}

impl LoggerError {
    /// Create a file sink error with path context
    pub fn file_sink(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoggerError::FileSink {
            path: path.into(),
            source,
        }
    }

    /// Create a message formatting error
    pub fn format(message: impl Into<String>) -> Self {
        LoggerError::Format {
            message: message.into(),
        }
    }

    /// Create an invalid format string error
    pub fn invalid_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidFormat {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn already_registered(name: impl Into<String>) -> Self {
        LoggerError::AlreadyRegistered { name: name.into() }
    }
}
