//! Core logger types and traits

pub mod config;
pub mod error;
pub mod formatter;
pub mod log_args;
pub mod log_level;
pub mod log_record;
pub mod log_value;
pub mod logger;
pub mod message;
pub mod pattern;
pub mod registry;
pub mod sink;

pub use config::{FileSinkConfig, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatter::{enable_virtual_terminal, strip_ansi, streams_are_terminals, ColorFormatter, ColorMode, Formatter, StripAnsiFormatter};
pub use log_args::{render_error_chain, LogArgs};
pub use log_level::{LogLevel, DEFAULT_LOG_LEVEL};
pub use log_record::LogRecord;
pub use log_value::LogValue;
pub use logger::{Logger, LoggerBuilder};
pub use pattern::{Pattern, DEFAULT_DATE_FORMAT, DEFAULT_LOG_FORMAT};
pub use registry::{Registry, RegistryBuilder, DEFAULT_LOGGER_NAME, DEFAULT_ROOT_LEVEL, ROOT_LOGGER_NAME};
pub use sink::{Sink, SinkHandle};
