//! # Color Logger
//!
//! A logging facade with colorized console output and a registry of named
//! loggers that can be reconfigured together.
//!
//! ## Features
//!
//! - **Colored levels**: level labels are colored on terminals, plain elsewhere
//! - **Global levels**: one call changes every logger created through the crate
//! - **Retroactive file sinks**: add a log file after loggers already exist
//! - **Test capture**: collect records from every logger with [`CaptureBuffer`]
//!
//! ## Example
//!
//! ```
//! use color_logger::prelude::*;
//!
//! let registry = Registry::builder().args(Vec::<String>::new()).build();
//! let capture = CaptureBuffer::new();
//! registry.caplog_integrate(&capture.handle());
//!
//! let log = registry.get_logger("svc");
//! log.debug("hidden at the default level");
//! log.info("shown");
//! color_logger::info!(log, "user %s logged in", "ada"; attempt = 2).unwrap();
//!
//! assert_eq!(capture.messages(), vec!["shown", "user ada logged in attempt=2"]);
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ColorFormatter, ColorMode, FileSinkConfig, Formatter, LogArgs, LogLevel, LogRecord,
        LogValue, Logger, LoggerBuilder, LoggerConfig, LoggerError, Pattern, Registry,
        RegistryBuilder, Result, Sink, SinkHandle, StripAnsiFormatter,
    };
    pub use crate::global::{caplog_integrate, enable_file_logging, get_logger, set_level};
    pub use crate::sinks::{CaptureBuffer, CapturedRecord, ConsoleSink, FileSink};
}

pub use crate::core::{
    ColorFormatter, ColorMode, FileSinkConfig, Formatter, LogArgs, LogLevel, LogRecord, LogValue,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, Pattern, Registry, RegistryBuilder, Result,
    Sink, SinkHandle, StripAnsiFormatter, DEFAULT_DATE_FORMAT, DEFAULT_LOGGER_NAME,
    DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, ROOT_LOGGER_NAME,
};
pub use global::{caplog_integrate, enable_file_logging, get_logger, logger, registry, root, set_level};
pub use sinks::{CaptureBuffer, CaptureSink, CapturedRecord, ConsoleSink, FileSink};
