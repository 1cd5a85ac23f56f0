//! In-memory capture sink for test assertions

use crate::core::{Formatter, LogLevel, LogRecord, Result, Sink, SinkHandle, StripAnsiFormatter};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: LogLevel,
    pub name: String,
    pub message: String,
    pub line: u32,
    /// The record as rendered by the capture formatter
    pub text: String,
}

/// Shared store of captured records; clones see the same records.
///
/// # Examples
///
/// ```
/// use color_logger::{CaptureBuffer, LogLevel, Registry};
///
/// let registry = Registry::builder().args(Vec::<String>::new()).build();
/// let capture = CaptureBuffer::new();
/// registry.caplog_integrate(&capture.handle());
///
/// let log = registry.get_logger("svc");
/// log.debug("hidden");
/// log.info("shown");
///
/// assert!(capture.text().contains("shown"));
/// assert!(!capture.text().contains("hidden"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capture-flagged sink handle writing into this buffer
    pub fn handle(&self) -> SinkHandle {
        SinkHandle::capture(CaptureSink::new(self.clone()))
    }

    /// All rendered records, one per line
    pub fn text(&self) -> String {
        let records = self.records.lock();
        let mut text = String::new();
        for record in records.iter() {
            text.push_str(&record.text);
            text.push('\n');
        }
        text
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn push(&self, record: CapturedRecord) {
        self.records.lock().push(record);
    }
}

pub struct CaptureSink {
    buffer: CaptureBuffer,
    formatter: Box<dyn Formatter>,
}

impl CaptureSink {
    pub fn new(buffer: CaptureBuffer) -> Self {
        Self::with_formatter(buffer, StripAnsiFormatter::default())
    }

    pub fn with_formatter(buffer: CaptureBuffer, formatter: impl Formatter + 'static) -> Self {
        Self {
            buffer,
            formatter: Box::new(formatter),
        }
    }
}

impl Sink for CaptureSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        self.buffer.push(CapturedRecord {
            level: record.level,
            name: record.name.clone(),
            message: record.message.clone(),
            line: record.line,
            text: self.formatter.format(record),
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}
