//! Process-wide registry and the free functions operating on it
//!
//! The registry is constructed on first use and lives for the rest of the
//! process. Libraries fetch their loggers with [`get_logger`]; applications
//! adjust everything at once with [`set_level`] and [`enable_file_logging`].

use crate::core::{LogLevel, Logger, Registry, Result, SinkHandle};
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// The process-wide default logger
pub fn logger() -> Arc<Logger> {
    REGISTRY.default_logger()
}

/// The ambient root channel
pub fn root() -> Arc<Logger> {
    REGISTRY.root()
}

/// Get a logger with the given `name`, at the default logger's current level.
///
/// # Examples
///
/// ```
/// let log = color_logger::get_logger("mypackage.mymodule");
/// log.info("My module info message");
/// assert!(std::sync::Arc::ptr_eq(&log, &color_logger::get_logger("mypackage.mymodule")));
/// ```
pub fn get_logger(name: &str) -> Arc<Logger> {
    REGISTRY.get_logger(name)
}

/// Change the level of every logger created through this crate
pub fn set_level(level: LogLevel) {
    REGISTRY.set_level(level);
}

/// Send every registered logger, and the root channel, to `path` as well
pub fn enable_file_logging(
    path: impl AsRef<Path>,
    level: Option<LogLevel>,
    fmt: Option<&str>,
) -> Result<()> {
    REGISTRY.enable_file_logging(path, level, fmt)
}

/// Attach a test capture sink to every logger, exempt from level changes
pub fn caplog_integrate(handle: &SinkHandle) {
    REGISTRY.caplog_integrate(handle);
}
