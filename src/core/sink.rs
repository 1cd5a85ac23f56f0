//! Sink trait for log output destinations, and the shared handle loggers hold

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait Sink: Send {
    fn emit(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

struct SinkState {
    level: RwLock<LogLevel>,
    capture: AtomicBool,
    sink: Mutex<Box<dyn Sink>>,
}

/// A sink plus its level filter, shareable between loggers.
///
/// Cloning yields another handle to the same sink; a capture handle attached
/// to several loggers collects all of their records.
#[derive(Clone)]
pub struct SinkHandle {
    inner: Arc<SinkState>,
}

impl SinkHandle {
    pub fn new(sink: impl Sink + 'static, level: LogLevel) -> Self {
        Self::from_parts(Box::new(sink), level, false)
    }

    /// Handle exempt from level cascades, admitting every record
    pub fn capture(sink: impl Sink + 'static) -> Self {
        Self::from_parts(Box::new(sink), LogLevel::NotSet, true)
    }

    fn from_parts(sink: Box<dyn Sink>, level: LogLevel, capture: bool) -> Self {
        Self {
            inner: Arc::new(SinkState {
                level: RwLock::new(level),
                capture: AtomicBool::new(capture),
                sink: Mutex::new(sink),
            }),
        }
    }

    pub fn level(&self) -> LogLevel {
        *self.inner.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.inner.level.write() = level;
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.inner.capture.load(Ordering::Acquire)
    }

    /// Exempt this sink from level cascades from now on
    pub fn mark_capture(&self) {
        self.inner.capture.store(true, Ordering::Release);
    }

    pub fn name(&self) -> String {
        self.inner.sink.lock().name().to_string()
    }

    /// Whether both handles point to the same sink
    pub fn same_sink(&self, other: &SinkHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Emit `record` if it passes this sink's level filter
    pub fn handle(&self, record: &LogRecord) -> Result<()> {
        if record.level < self.level() {
            return Ok(());
        }
        self.inner.sink.lock().emit(record)
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.sink.lock().flush()
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkHandle")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("capture", &self.is_capture())
            .finish()
    }
}
