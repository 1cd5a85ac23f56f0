//! Console sink implementation

use crate::core::{ColorFormatter, Formatter, LogRecord, Result, Sink};
use std::io::Write;

/// Writes formatted records to standard output (or any injected writer).
pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    formatter: Box<dyn Formatter>,
}

impl ConsoleSink {
    /// Standard output with the colorizing formatter
    pub fn new() -> Self {
        Self::stdout(ColorFormatter::default())
    }

    pub fn stdout(formatter: impl Formatter + 'static) -> Self {
        Self::with_writer(std::io::stdout(), formatter)
    }

    /// Use an arbitrary writer, e.g. an in-memory buffer in tests
    pub fn with_writer(writer: impl Write + Send + 'static, formatter: impl Formatter + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            formatter: Box::new(formatter),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let mut output = self.formatter.format(record);
        output.push('\n');
        self.writer.write_all(output.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColorMode, LogLevel};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_record() {
        let buffer = SharedBuffer::default();
        let mut sink = ConsoleSink::with_writer(
            buffer.clone(),
            ColorFormatter::default().with_color_mode(ColorMode::Never),
        );

        sink.emit(&LogRecord::new(LogLevel::Info, "svc", "first")).unwrap();
        sink.emit(&LogRecord::new(LogLevel::Warning, "svc", "second")).unwrap();

        let text = String::from_utf8(buffer.0.lock().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO]: first"));
        assert!(lines[1].ends_with("[WARNING]: second"));
    }

    #[test]
    fn test_color_mode_respected() {
        let buffer = SharedBuffer::default();
        let mut sink = ConsoleSink::with_writer(
            buffer.clone(),
            ColorFormatter::default().with_color_mode(ColorMode::Always),
        );

        sink.emit(&LogRecord::new(LogLevel::Debug, "svc", "dbg")).unwrap();

        let text = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert!(text.contains("[\x1b[35mDEBUG\x1b[0m]: dbg"));
    }
}
