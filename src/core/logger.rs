//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    formatter::{ColorFormatter, StripAnsiFormatter},
    log_args::{render_error_chain, LogArgs},
    log_level::LogLevel,
    log_record::LogRecord,
    message,
    pattern::Pattern,
    registry::{Registry, RegistryState},
    sink::SinkHandle,
};
use crate::sinks::{ConsoleSink, FileSink};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::panic::{AssertUnwindSafe, Location};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// A named, leveled channel owning an ordered list of sinks.
///
/// Loggers are always created through a [`Registry`] (directly with
/// [`Logger::builder`] or via [`Registry::get_logger`]) and live as long as it.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    propagate: AtomicBool,
    sinks: RwLock<Vec<SinkHandle>>,
    registry: Weak<RegistryState>,
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        level: LogLevel,
        propagate: bool,
        registry: Weak<RegistryState>,
    ) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(level),
            propagate: AtomicBool::new(propagate),
            sinks: RwLock::new(Vec::new()),
            registry,
        }
    }

    /// Logger with the always-present console sink at `level`
    pub(crate) fn with_console(
        name: impl Into<String>,
        level: LogLevel,
        pattern: Pattern,
        propagate: bool,
        registry: Weak<RegistryState>,
    ) -> Self {
        let logger = Self::new(name, level, propagate, registry);
        logger.add_sink(SinkHandle::new(
            ConsoleSink::stdout(ColorFormatter::new(pattern)),
            level,
        ));
        logger
    }

    /// Create a builder for a Logger named `name`
    ///
    /// # Example
    /// ```
    /// use color_logger::prelude::*;
    ///
    /// let registry = Registry::builder().args(Vec::<String>::new()).build();
    /// let logger = Logger::builder("svc.db")
    ///     .level(LogLevel::Warning)
    ///     .propagate(true)
    ///     .build_in(&registry)
    ///     .unwrap();
    /// assert_eq!(logger.level(), LogLevel::Warning);
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// Set this logger's level and the level of each of its non-capture sinks.
    ///
    /// Other loggers are not affected; see [`Registry::set_level`] for the
    /// broadcast form.
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
        for sink in self.sinks.read().iter().filter(|sink| !sink.is_capture()) {
            sink.set_level(level);
        }
    }

    pub fn propagate(&self) -> bool {
        self.propagate.load(Ordering::Acquire)
    }

    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Release);
    }

    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Snapshot of the attached sinks, in attachment order
    pub fn sinks(&self) -> Vec<SinkHandle> {
        self.sinks.read().clone()
    }

    /// Attach a sink; attaching the same handle twice is a no-op
    pub fn add_sink(&self, sink: SinkHandle) {
        let mut sinks = self.sinks.write();
        if !sinks.iter().any(|existing| existing.same_sink(&sink)) {
            sinks.push(sink);
        }
    }

    /// Append a color-free file sink for `path`.
    ///
    /// `level` defaults to this logger's current level, `fmt` to the default
    /// line format. The file is created if absent and appended to otherwise.
    pub fn enable_file_logging(
        &self,
        path: impl AsRef<Path>,
        level: Option<LogLevel>,
        fmt: Option<&str>,
    ) -> Result<()> {
        let pattern = match fmt {
            Some(format) => Pattern::parse(format)?,
            None => Pattern::default(),
        };
        self.attach_file(path.as_ref(), level, pattern)
    }

    pub(crate) fn attach_file(
        &self,
        path: &Path,
        level: Option<LogLevel>,
        pattern: Pattern,
    ) -> Result<()> {
        let sink = FileSink::with_formatter(path, StripAnsiFormatter::new(pattern))?;
        self.add_sink(SinkHandle::new(sink, level.unwrap_or_else(|| self.level())));
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        for sink in self.sinks() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Log `msg` with positional/keyword extras and emission options.
    ///
    /// Returns [`LoggerError::Format`] when percent placeholders in `msg` do
    /// not match the positional extras, whether or not `level` is enabled.
    #[track_caller]
    pub fn log(&self, level: LogLevel, msg: impl Into<String>, args: LogArgs) -> Result<()> {
        let msg = msg.into();
        let text = message::assemble(&msg, &args.args, &args.kwargs)?;
        if self.is_enabled_for(level) {
            self.emit(level, text, args);
        }
        Ok(())
    }

    #[track_caller]
    fn log_plain(&self, level: LogLevel, msg: impl Into<String>) {
        if self.is_enabled_for(level) {
            self.emit(level, msg.into(), LogArgs::default());
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, msg: impl Into<String>) {
        self.log_plain(LogLevel::Debug, msg);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, msg: impl Into<String>) {
        self.log_plain(LogLevel::Info, msg);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, msg: impl Into<String>) {
        self.log_plain(LogLevel::Warning, msg);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, msg: impl Into<String>) {
        self.log_plain(LogLevel::Error, msg);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, msg: impl Into<String>) {
        self.log_plain(LogLevel::Critical, msg);
    }

    /// Log `err` at ERROR with its cause chain attached as exception text
    #[track_caller]
    pub fn exception(&self, err: &dyn Error) {
        if self.is_enabled_for(LogLevel::Error) {
            let args = LogArgs {
                exc_text: Some(render_error_chain(err)),
                ..LogArgs::default()
            };
            self.emit(LogLevel::Error, err.to_string(), args);
        }
    }

    #[track_caller]
    fn emit(&self, level: LogLevel, text: String, args: LogArgs) {
        let mut record = LogRecord::with_location(level, self.name.as_str(), text, Location::caller());
        record.exc_text = args.exc_text;
        record.extra = args.extra;
        if args.stack_info {
            record.stack_info = Some(format!(
                "Stack (most recent call last):\n{}",
                std::backtrace::Backtrace::force_capture()
            ));
        }
        self.dispatch(&record);
    }

    fn dispatch(&self, record: &LogRecord) {
        self.call_sinks(record);
        if !self.propagate() {
            return;
        }
        for ancestor in self.ancestors() {
            ancestor.call_sinks(record);
            if !ancestor.propagate() {
                break;
            }
        }
    }

    /// Registered dotted ancestors, nearest first, then the root channel
    fn ancestors(&self) -> Vec<Arc<Logger>> {
        let Some(registry) = self.registry.upgrade() else {
            return Vec::new();
        };

        let mut chain = Vec::new();
        let mut name = self.name.as_str();
        while let Some((parent, _)) = name.rsplit_once('.') {
            if let Some(logger) = registry.lookup(parent) {
                chain.push(logger);
            }
            name = parent;
        }
        chain.push(registry.root());
        chain
    }

    /// Hand `record` to each sink, isolating failures and panics per sink
    fn call_sinks(&self, record: &LogRecord) {
        for (idx, sink) in self.sinks().iter().enumerate() {
            let result = std::panic::catch_unwind(AssertUnwindSafe(|| sink.handle(record)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Sink #{} ({}) of logger '{}' failed: {}",
                        idx,
                        sink.name(),
                        self.name,
                        e
                    );
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} of logger '{}' panicked: {}. \
                         Other sinks continue to function.",
                        idx, self.name, panic_msg
                    );
                }
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("propagate", &self.propagate())
            .field("sinks", &self.sinks.read().len())
            .finish()
    }
}

/// Builder for constructing a registered Logger with a fluent API
///
/// # Example
/// ```
/// use color_logger::prelude::*;
///
/// let registry = Registry::builder().args(Vec::<String>::new()).build();
/// let logger = Logger::builder("svc")
///     .format("%(levelname)s %(name)s: %(message)s")
///     .build_in(&registry)
///     .unwrap();
/// assert_eq!(logger.sinks().len(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    level: Option<LogLevel>,
    format: Option<String>,
    datefmt: Option<String>,
    propagate: bool,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            format: None,
            datefmt: None,
            propagate: false,
        }
    }

    /// Explicit level; `NotSet` behaves as if no level was given
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Format string for the console sink
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// strftime layout for `%(asctime)s` on the console sink
    #[must_use = "builder methods return a new value"]
    pub fn datefmt(mut self, datefmt: impl Into<String>) -> Self {
        self.datefmt = Some(datefmt.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Build into the process-wide registry
    pub fn build(self) -> Result<Arc<Logger>> {
        self.build_in(crate::global::registry())
    }

    /// Build into `registry`.
    ///
    /// Fails with [`LoggerError::AlreadyRegistered`] if the name is taken and
    /// with [`LoggerError::InvalidFormat`] if the format string is malformed.
    pub fn build_in(self, registry: &Registry) -> Result<Arc<Logger>> {
        let mut pattern = match self.format {
            Some(ref format) => Pattern::parse(format)?,
            None => Pattern::default(),
        };
        if let Some(datefmt) = self.datefmt {
            pattern = pattern.with_datefmt(datefmt);
        }

        let level = self.level;
        let propagate = self.propagate;
        registry
            .create(&self.name, |registry| {
                registry.construct(&self.name, level, pattern, propagate)
            })
            .ok_or_else(|| LoggerError::already_registered(self.name.as_str()))
    }
}
