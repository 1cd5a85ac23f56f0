//! Log record structure

use super::log_level::LogLevel;
use super::log_value::LogValue;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::panic::Location;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// A single emitted event, as handed to every sink.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Name of the logger that created the record
    pub name: String,
    /// Fully assembled message text
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub file: &'static str,
    pub line: u32,
    pub thread_id: String,
    pub thread_name: Option<String>,
    /// Rendered exception and its cause chain, printed after the line
    pub exc_text: Option<String>,
    /// Captured stack, printed after the exception text
    pub stack_info: Option<String>,
    /// Caller-supplied fields, available to format strings but not to the message
    pub extra: Vec<(String, LogValue)>,
}

impl LogRecord {
    #[track_caller]
    pub fn new(level: LogLevel, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_location(level, name, message, Location::caller())
    }

    pub fn with_location(
        level: LogLevel,
        name: impl Into<String>,
        message: impl Into<String>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            level,
            name: name.into(),
            message: message.into(),
            timestamp: Local::now(),
            file: location.file(),
            line: location.line(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            exc_text: None,
            stack_info: None,
            extra: Vec::new(),
        }
    }

    /// Look up a caller-supplied extra field
    pub fn extra_field(&self, key: &str) -> Option<&LogValue> {
        self.extra
            .iter()
            .find_map(|(name, value)| (name == key).then_some(value))
    }

    /// File name component of the caller path
    pub fn filename(&self) -> &str {
        std::path::Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }

    /// File name without extension
    pub fn module(&self) -> &str {
        std::path::Path::new(self.file)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.file)
    }
}
