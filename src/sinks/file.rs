//! File sink implementation

use crate::core::{Formatter, LogRecord, LoggerError, Result, Sink, StripAnsiFormatter};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends plain-text records to a file, one per line, flushed per record.
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
    formatter: Box<dyn Formatter>,
}

impl FileSink {
    /// Open `path` for appending (creating it if absent) with the color-stripping formatter
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_formatter(path, StripAnsiFormatter::default())
    }

    pub fn with_formatter(path: impl Into<PathBuf>, formatter: impl Formatter + 'static) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggerError::file_sink(&path, source))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            formatter: Box::new(formatter),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
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
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.flush();
    }
}
