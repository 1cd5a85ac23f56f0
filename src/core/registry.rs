//! Registry of facade-managed loggers
//!
//! A registry owns the root channel, the default logger and every logger
//! created through it. Level broadcasts, retroactive file sinks and capture
//! sinks all fan out over its entries. Entries are never removed.

use super::{
    config::LoggerConfig,
    error::Result,
    formatter::enable_virtual_terminal,
    log_level::{LogLevel, DEFAULT_LOG_LEVEL},
    logger::Logger,
    pattern::Pattern,
    sink::SinkHandle,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Weak};

/// Name of the ambient root channel
pub const ROOT_LOGGER_NAME: &str = "root";

/// Name of the default logger every broadcast starts from
pub const DEFAULT_LOGGER_NAME: &str = env!("CARGO_PKG_NAME");

/// Level of the root channel unless configured otherwise
pub const DEFAULT_ROOT_LEVEL: LogLevel = LogLevel::Warning;

pub(crate) struct RegistryState {
    root: Arc<Logger>,
    default_logger: Arc<Logger>,
    loggers: RwLock<IndexMap<String, Arc<Logger>>>,
    captures: RwLock<Vec<SinkHandle>>,
    args: Option<Vec<OsString>>,
}

impl RegistryState {
    pub(crate) fn lookup(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).cloned()
    }

    pub(crate) fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    fn verbose_requested(&self) -> bool {
        verbose_flag(self.args.as_deref())
    }
}

fn is_verbose_arg(arg: &OsStr) -> bool {
    arg == "-v" || arg == "--verbose"
}

/// `-v` / `--verbose` anywhere in the injected arguments, or the process arguments
fn verbose_flag(args: Option<&[OsString]>) -> bool {
    match args {
        Some(args) => args.iter().any(|arg| is_verbose_arg(arg)),
        None => std::env::args_os().any(|arg| is_verbose_arg(&arg)),
    }
}

/// Construction-time level: explicit unless absent or `NotSet`, else the more
/// verbose of the default and the root level; the verbose flag forces Debug.
fn resolve_level(explicit: Option<LogLevel>, root_level: LogLevel, verbose: bool) -> LogLevel {
    if verbose {
        return LogLevel::Debug;
    }
    match explicit {
        Some(level) if level != LogLevel::NotSet => level,
        _ => DEFAULT_LOG_LEVEL.min(root_level),
    }
}

enum Slot {
    Existing(Arc<Logger>),
    Created(Arc<Logger>),
}

/// Handle to a logger registry; clones share the same registry.
///
/// # Example
/// ```
/// use color_logger::prelude::*;
///
/// let registry = Registry::builder().args(Vec::<String>::new()).build();
/// let a = registry.get_logger("a");
/// let b = registry.get_logger("b");
///
/// registry.set_level(LogLevel::Error);
/// assert_eq!(a.level(), LogLevel::Error);
/// assert_eq!(b.level(), LogLevel::Error);
/// ```
#[derive(Clone)]
pub struct Registry {
    state: Arc<RegistryState>,
}

impl Registry {
    /// Registry reading the verbose flag from the process arguments
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The ambient root channel; receives records from propagating loggers
    pub fn root(&self) -> Arc<Logger> {
        self.state.root()
    }

    /// The logger whose level [`Registry::get_logger`] hands out
    pub fn default_logger(&self) -> Arc<Logger> {
        Arc::clone(&self.state.default_logger)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Logger>> {
        self.state.lookup(name)
    }

    /// Snapshot of all registered loggers in registration order
    pub fn loggers(&self) -> Vec<Arc<Logger>> {
        self.state.loggers.read().values().cloned().collect()
    }

    /// Capture sinks integrated so far
    pub fn captures(&self) -> Vec<SinkHandle> {
        self.state.captures.read().clone()
    }

    /// Fetch or create the logger `name`, then align its level and its
    /// non-capture sinks with the default logger's current level.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        let logger = match self.slot(name, |registry| {
            registry.construct(name, None, Pattern::default(), false)
        }) {
            Slot::Existing(logger) | Slot::Created(logger) => logger,
        };
        logger.set_level(self.state.default_logger.level());
        logger
    }

    /// Register a new logger built by `make`; `None` if `name` is taken
    pub(crate) fn create(
        &self,
        name: &str,
        make: impl FnOnce(&Registry) -> Logger,
    ) -> Option<Arc<Logger>> {
        match self.slot(name, make) {
            Slot::Created(logger) => Some(logger),
            Slot::Existing(_) => None,
        }
    }

    fn slot(&self, name: &str, make: impl FnOnce(&Registry) -> Logger) -> Slot {
        if let Some(existing) = self.lookup(name) {
            return Slot::Existing(existing);
        }

        let mut loggers = self.state.loggers.write();
        if let Some(existing) = loggers.get(name) {
            return Slot::Existing(Arc::clone(existing));
        }

        let logger = Arc::new(make(self));
        for capture in self.state.captures.read().iter() {
            logger.add_sink(capture.clone());
        }
        loggers.insert(name.to_string(), Arc::clone(&logger));
        Slot::Created(logger)
    }

    pub(crate) fn construct(
        &self,
        name: &str,
        level: Option<LogLevel>,
        pattern: Pattern,
        propagate: bool,
    ) -> Logger {
        let level = resolve_level(
            level,
            self.state.root.level(),
            self.state.verbose_requested(),
        );
        Logger::with_console(name, level, pattern, propagate, Arc::downgrade(&self.state))
    }

    /// Set `level` on the default logger, then on every other registered
    /// logger, including each one's non-capture sinks.
    pub fn set_level(&self, level: LogLevel) {
        let default_logger = &self.state.default_logger;
        default_logger.set_level(level);
        for logger in self.loggers() {
            if !Arc::ptr_eq(&logger, default_logger) {
                logger.set_level(level);
            }
        }
    }

    /// Attach a file sink for `path` to the root channel and an independent
    /// one to every registered logger.
    ///
    /// Without an explicit `level` each sink takes its own logger's level.
    pub fn enable_file_logging(
        &self,
        path: impl AsRef<Path>,
        level: Option<LogLevel>,
        fmt: Option<&str>,
    ) -> Result<()> {
        let path = path.as_ref();
        let pattern = match fmt {
            Some(format) => Pattern::parse(format)?,
            None => Pattern::default(),
        };

        self.state.root.attach_file(path, level, pattern.clone())?;
        for logger in self.loggers() {
            logger.attach_file(path, level, pattern.clone())?;
        }
        Ok(())
    }

    /// Mark `handle` as a capture sink and attach it to every logger,
    /// including loggers registered later.
    pub fn caplog_integrate(&self, handle: &SinkHandle) {
        handle.mark_capture();
        {
            let mut captures = self.state.captures.write();
            if !captures.iter().any(|capture| capture.same_sink(handle)) {
                captures.push(handle.clone());
            }
        }

        self.state.default_logger.add_sink(handle.clone());
        for logger in self.loggers() {
            logger.add_sink(handle.clone());
        }
    }

    /// Build and register a logger from `config`, attaching its file sinks
    ///
    /// # Example
    /// ```
    /// use color_logger::{LoggerConfig, LogLevel, Registry};
    ///
    /// let registry = Registry::builder().args(Vec::<String>::new()).build();
    /// let config = LoggerConfig {
    ///     level: Some(LogLevel::Debug),
    ///     ..LoggerConfig::default()
    /// };
    /// let logger = registry.configure("worker", &config).unwrap();
    /// assert_eq!(logger.level(), LogLevel::Debug);
    /// ```
    pub fn configure(&self, name: &str, config: &LoggerConfig) -> Result<Arc<Logger>> {
        let mut builder = Logger::builder(name).propagate(config.propagate);
        if let Some(level) = config.level {
            builder = builder.level(level);
        }
        if let Some(ref format) = config.format {
            builder = builder.format(format.as_str());
        }
        if let Some(ref datefmt) = config.datefmt {
            builder = builder.datefmt(datefmt.as_str());
        }

        let logger = builder.build_in(self)?;
        for file in &config.files {
            logger.enable_file_logging(&file.path, file.level, config.format.as_deref())?;
        }
        Ok(logger)
    }

    /// Flush the root channel and every registered logger
    pub fn flush(&self) -> Result<()> {
        self.state.root.flush()?;
        for logger in self.loggers() {
            logger.flush()?;
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("root", &self.state.root)
            .field("loggers", &self.state.loggers.read().keys().collect::<Vec<_>>())
            .field("captures", &self.state.captures.read().len())
            .finish()
    }
}

/// Builder for a [`Registry`]
pub struct RegistryBuilder {
    args: Option<Vec<OsString>>,
    root_level: LogLevel,
    default_name: String,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            args: None,
            root_level: DEFAULT_ROOT_LEVEL,
            default_name: DEFAULT_LOGGER_NAME.to_string(),
        }
    }

    /// Scan these arguments for the verbose flag instead of the process arguments
    #[must_use = "builder methods return a new value"]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub fn build(self) -> Registry {
        enable_virtual_terminal();
        let state = Arc::new_cyclic(|weak: &Weak<RegistryState>| {
            let root = Arc::new(Logger::new(
                ROOT_LOGGER_NAME,
                self.root_level,
                false,
                Weak::new(),
            ));
            let level = resolve_level(None, root.level(), verbose_flag(self.args.as_deref()));
            let default_logger = Arc::new(Logger::with_console(
                self.default_name.as_str(),
                level,
                Pattern::default(),
                false,
                weak.clone(),
            ));

            let mut loggers = IndexMap::new();
            loggers.insert(self.default_name, Arc::clone(&default_logger));

            RegistryState {
                root,
                default_logger,
                loggers: RwLock::new(loggers),
                captures: RwLock::new(Vec::new()),
                args: self.args,
            }
        });

        Registry { state }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::CaptureBuffer;

    fn registry() -> Registry {
        Registry::builder().args(Vec::<String>::new()).build()
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(resolve_level(Some(LogLevel::Error), LogLevel::Warning, false), LogLevel::Error);
        assert_eq!(resolve_level(None, LogLevel::Warning, false), LogLevel::Info);
        assert_eq!(resolve_level(None, LogLevel::Debug, false), LogLevel::Debug);
        assert_eq!(resolve_level(Some(LogLevel::NotSet), LogLevel::Warning, false), LogLevel::Info);
        assert_eq!(resolve_level(Some(LogLevel::Critical), LogLevel::Warning, true), LogLevel::Debug);
    }

    #[test]
    fn test_verbose_flag_detection() {
        let args: Vec<OsString> = vec!["prog".into(), "--verbose".into()];
        assert!(verbose_flag(Some(args.as_slice())));
        let args: Vec<OsString> = vec!["prog".into(), "-vv".into(), "verbose".into()];
        assert!(!verbose_flag(Some(args.as_slice())));
    }

    #[test]
    fn test_default_logger_is_registered() {
        let registry = registry();
        let default = registry.default_logger();
        assert_eq!(default.name(), DEFAULT_LOGGER_NAME);
        assert!(Arc::ptr_eq(&registry.get_logger(DEFAULT_LOGGER_NAME), &default));
        assert_eq!(registry.loggers().len(), 1);
        assert_eq!(registry.root().level(), LogLevel::Warning);
        assert!(registry.root().sinks().is_empty());
    }

    #[test]
    fn test_get_logger_reuses_instances() {
        let registry = registry();
        let first = registry.get_logger("svc");
        let second = registry.get_logger("svc");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.loggers().len(), 2);
    }

    #[test]
    fn test_get_logger_inherits_default_level() {
        let registry = registry();
        let explicit = Logger::builder("svc")
            .level(LogLevel::Critical)
            .build_in(&registry)
            .unwrap();
        registry.default_logger().set_level(LogLevel::Debug);

        let fetched = registry.get_logger("svc");
        assert!(Arc::ptr_eq(&explicit, &fetched));
        assert_eq!(fetched.level(), LogLevel::Debug);
        assert!(fetched.sinks().iter().all(|sink| sink.level() == LogLevel::Debug));
    }

    #[test]
    fn test_root_level_lower_than_default_wins() {
        let registry = Registry::builder()
            .args(Vec::<String>::new())
            .root_level(LogLevel::Debug)
            .build();
        let logger = Logger::builder("local").build_in(&registry).unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);

        registry.root().set_level(LogLevel::Warning);
        let logger = Logger::builder("local2").build_in(&registry).unwrap();
        assert_eq!(logger.level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_verbose_args_force_debug_at_construction_only() {
        let registry = Registry::builder().args(["prog", "-v"]).build();
        assert_eq!(registry.default_logger().level(), LogLevel::Debug);

        let logger = Logger::builder("svc")
            .level(LogLevel::Error)
            .build_in(&registry)
            .unwrap();
        assert_eq!(logger.level(), LogLevel::Debug);

        logger.set_level(LogLevel::Error);
        assert_eq!(logger.level(), LogLevel::Error);
    }

    #[test]
    fn test_broadcast_reaches_default_and_other_loggers() {
        let registry = registry();
        let default = registry.default_logger();
        let other = registry.get_logger("other");
        let extra = SinkHandle::new(crate::sinks::CaptureSink::new(CaptureBuffer::new()), LogLevel::Info);
        default.add_sink(extra.clone());

        registry.set_level(LogLevel::Error);

        assert_eq!(default.level(), LogLevel::Error);
        assert_eq!(extra.level(), LogLevel::Error);
        assert_eq!(other.level(), LogLevel::Error);
        assert_eq!(registry.loggers().len(), 2);
    }

    #[test]
    fn test_broadcast_skips_capture_sinks() {
        let registry = registry();
        let capture = CaptureBuffer::new();
        let handle = capture.handle();
        registry.caplog_integrate(&handle);
        let a = registry.get_logger("a");

        registry.set_level(LogLevel::Critical);

        assert_eq!(a.level(), LogLevel::Critical);
        assert_eq!(handle.level(), LogLevel::NotSet);
        assert_eq!(registry.default_logger().level(), LogLevel::Critical);
    }

    #[test]
    fn test_caplog_integrate_marks_and_reaches_later_loggers() {
        let registry = registry();
        let buffer = CaptureBuffer::new();
        let handle = SinkHandle::new(crate::sinks::CaptureSink::new(buffer.clone()), LogLevel::NotSet);
        assert!(!handle.is_capture());

        registry.caplog_integrate(&handle);
        registry.caplog_integrate(&handle);
        assert!(handle.is_capture());
        assert_eq!(registry.captures().len(), 1);

        let later = registry.get_logger("later");
        assert!(later.sinks().iter().any(|sink| sink.same_sink(&handle)));
        later.info("seen");
        assert_eq!(buffer.messages(), vec!["seen"]);
    }

    #[test]
    fn test_propagation_reaches_ancestors_and_root() {
        let registry = registry();
        let parent_capture = CaptureBuffer::new();
        let root_capture = CaptureBuffer::new();

        let parent = registry.get_logger("app");
        parent.add_sink(parent_capture.handle());
        registry.root().add_sink(root_capture.handle());

        let child = Logger::builder("app.db")
            .propagate(true)
            .build_in(&registry)
            .unwrap();
        child.info("query done");

        assert_eq!(parent_capture.messages(), vec!["query done"]);
        // The parent does not propagate, so the root never sees it
        assert!(root_capture.is_empty());

        parent.set_propagate(true);
        child.info("second");
        assert_eq!(root_capture.messages(), vec!["second"]);
    }

    #[test]
    fn test_non_propagating_logger_stays_local() {
        let registry = registry();
        let root_capture = CaptureBuffer::new();
        registry.root().add_sink(root_capture.handle());

        registry.get_logger("quiet").warning("local only");
        assert!(root_capture.is_empty());
    }
}
