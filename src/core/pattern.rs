//! Format-string handling for text records
//!
//! Format strings use named placeholders such as `%(asctime)s` or
//! `%(levelname)-8s`. They are parsed once into segments and rendered per
//! record.

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::message::MAX_FIELD_WIDTH;
use std::fmt::Write;

/// Default line layout: `[<asctime>] - <name>:<lineno> [<LEVEL>]: <message>`
pub const DEFAULT_LOG_FORMAT: &str =
    "[%(asctime)s] - %(name)s:%(lineno)d [%(levelname)s]: %(message)s";

/// Default `asctime` rendering, e.g. `2026-10-17 14:03:07,512`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Asctime,
    Created,
    Name,
    LevelName,
    LevelNo,
    Message,
    PathName,
    FileName,
    Module,
    LineNo,
    Thread,
    ThreadName,
    Extra(String),
}

impl Field {
    fn from_name(name: &str) -> Self {
        match name {
            "asctime" => Field::Asctime,
            "created" => Field::Created,
            "name" => Field::Name,
            "levelname" => Field::LevelName,
            "levelno" => Field::LevelNo,
            "message" => Field::Message,
            "pathname" => Field::PathName,
            "filename" => Field::FileName,
            "module" => Field::Module,
            "lineno" => Field::LineNo,
            "thread" => Field::Thread,
            "threadName" => Field::ThreadName,
            other => Field::Extra(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        left_align: bool,
        width: usize,
    },
}

/// A parsed format string plus the strftime layout used for `asctime`.
///
/// # Examples
///
/// ```
/// use color_logger::core::Pattern;
///
/// let pattern = Pattern::parse("%(levelname)-8s %(name)s: %(message)s").unwrap();
/// assert_eq!(pattern.source(), "%(levelname)-8s %(name)s: %(message)s");
/// assert!(Pattern::parse("%(name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
    datefmt: String,
}

impl Pattern {
    pub fn parse(format: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            match chars.next() {
                Some('%') => literal.push('%'),
                Some('(') => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some(')') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(LoggerError::invalid_format(
                                    format,
                                    format!("unterminated placeholder '%({}'", name),
                                ))
                            }
                        }
                    }

                    let left_align = chars.next_if_eq(&'-').is_some();
                    let mut width = 0usize;
                    while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
                        width = width.saturating_mul(10).saturating_add(digit as usize);
                        chars.next();
                    }
                    if width > MAX_FIELD_WIDTH {
                        return Err(LoggerError::invalid_format(
                            format,
                            format!("width too big for placeholder '{}'", name),
                        ));
                    }

                    match chars.next() {
                        Some('s' | 'd' | 'i' | 'f' | 'r') => {}
                        other => {
                            return Err(LoggerError::invalid_format(
                                format,
                                format!(
                                    "unsupported conversion {:?} for placeholder '{}'",
                                    other, name
                                ),
                            ))
                        }
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field {
                        field: Field::from_name(&name),
                        left_align,
                        width,
                    });
                }
                other => {
                    return Err(LoggerError::invalid_format(
                        format,
                        format!("expected '%(' or '%%', found {:?}", other),
                    ))
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: format.to_string(),
            segments,
            datefmt: DEFAULT_DATE_FORMAT.to_string(),
        })
    }

    /// Set a strftime-compatible layout for `%(asctime)s`
    #[must_use]
    pub fn with_datefmt(mut self, datefmt: impl Into<String>) -> Self {
        self.datefmt = datefmt.into();
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn datefmt(&self) -> &str {
        &self.datefmt
    }

    fn asctime(&self, record: &LogRecord) -> String {
        let mut text = String::new();
        // chrono reports a malformed layout as a fmt::Error
        if write!(text, "{}", record.timestamp.format(&self.datefmt)).is_err() {
            text.clear();
            let _ = write!(text, "{}", record.timestamp.format(DEFAULT_DATE_FORMAT));
        }
        text
    }

    /// Render `record`, substituting the already-processed level label and message
    pub fn render(&self, record: &LogRecord, levelname: &str, message: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + message.len() + 32);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field {
                    field,
                    left_align,
                    width,
                } => {
                    let value = match field {
                        Field::Asctime => self.asctime(record),
                        Field::Created => format!(
                            "{:.6}",
                            record.timestamp.timestamp_micros() as f64 / 1_000_000.0
                        ),
                        Field::Name => record.name.clone(),
                        Field::LevelName => levelname.to_string(),
                        Field::LevelNo => record.level.as_u8().to_string(),
                        Field::Message => message.to_string(),
                        Field::PathName => record.file.to_string(),
                        Field::FileName => record.filename().to_string(),
                        Field::Module => record.module().to_string(),
                        Field::LineNo => record.line.to_string(),
                        Field::Thread => record.thread_id.clone(),
                        Field::ThreadName => record
                            .thread_name
                            .clone()
                            .unwrap_or_else(|| record.thread_id.clone()),
                        Field::Extra(key) => record
                            .extra_field(key)
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    };

                    if *left_align {
                        out.push_str(&format!("{:<width$}", value, width = *width));
                    } else {
                        out.push_str(&format!("{:>width$}", value, width = *width));
                    }
                }
            }
        }

        out
    }
}

impl Default for Pattern {
    fn default() -> Self {
        let field = |field| Segment::Field {
            field,
            left_align: false,
            width: 0,
        };
        let literal = |text: &str| Segment::Literal(text.to_string());

        Self {
            source: DEFAULT_LOG_FORMAT.to_string(),
            segments: vec![
                literal("["),
                field(Field::Asctime),
                literal("] - "),
                field(Field::Name),
                literal(":"),
                field(Field::LineNo),
                literal(" ["),
                field(Field::LevelName),
                literal("]: "),
                field(Field::Message),
            ],
            datefmt: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}
