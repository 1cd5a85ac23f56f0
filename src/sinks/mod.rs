//! Sink implementations

pub mod capture;
pub mod console;
pub mod file;

pub use capture::{CaptureBuffer, CaptureSink, CapturedRecord};
pub use console::ConsoleSink;
pub use file::FileSink;

pub use crate::core::{Sink, SinkHandle};
