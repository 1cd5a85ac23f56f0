//! Record formatters: colorizing for terminals, color-stripping for files

use super::log_level::LogLevel;
use super::log_record::LogRecord;
use super::pattern::Pattern;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::io::IsTerminal;

const RESET: &str = "\x1b[0m";
const BRIGHT: &str = "\x1b[1m";

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B\[[0-9;]*m").expect("ANSI escape pattern is valid"));

/// Turns a record into one line of text (plus any exception/stack lines).
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

/// Remove every `ESC [ <digits/semicolons> m` sequence from `text`
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// True only when both stdout and stderr are attached to a terminal
pub fn streams_are_terminals() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Turn on ANSI escape handling for Windows consoles, once per process.
///
/// Returns whether escape codes are expected to render. Elsewhere this is a
/// no-op returning `true`.
pub fn enable_virtual_terminal() -> bool {
    #[cfg(windows)]
    {
        static ENABLED: once_cell::sync::OnceCell<bool> = once_cell::sync::OnceCell::new();
        *ENABLED.get_or_init(|| colored::control::set_virtual_terminal(true).is_ok())
    }
    #[cfg(not(windows))]
    {
        true
    }
}

fn append_trailers(line: &mut String, record: &LogRecord) {
    if let Some(ref exc_text) = record.exc_text {
        line.push('\n');
        line.push_str(exc_text);
    }
    if let Some(ref stack) = record.stack_info {
        line.push('\n');
        line.push_str(stack);
    }
}

/// When the colorizing formatter emits escape codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only if stdout and stderr are both terminals, probed per record
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => streams_are_terminals(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Wraps the level label in its terminal color.
#[derive(Debug, Clone, Default)]
pub struct ColorFormatter {
    pattern: Pattern,
    mode: ColorMode,
}

impl ColorFormatter {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            mode: ColorMode::Auto,
        }
    }

    /// Override terminal detection
    ///
    /// # Examples
    ///
    /// ```
    /// use color_logger::core::{ColorFormatter, ColorMode, Formatter, LogLevel, LogRecord};
    ///
    /// let formatter = ColorFormatter::default().with_color_mode(ColorMode::Always);
    /// let line = formatter.format(&LogRecord::new(LogLevel::Info, "svc", "up"));
    /// assert!(line.contains("[\x1b[32mINFO\x1b[0m]: up"));
    /// ```
    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    // Raw SGR bytes, independent of colored's process-wide override
    fn colorize(level: LogLevel) -> String {
        match level.color_code() {
            Some((color, bright)) => format!(
                "\x1b[{}m{}{}{}",
                color.to_fg_str(),
                if bright { BRIGHT } else { "" },
                level.to_str(),
                RESET
            ),
            None => level.to_str().to_string(),
        }
    }
}

impl Formatter for ColorFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut line = if self.mode.enabled() {
            self.pattern
                .render(record, &Self::colorize(record.level), &record.message)
        } else {
            self.pattern
                .render(record, record.level.to_str(), &record.message)
        };
        append_trailers(&mut line, record);
        line
    }
}

/// Plain-text formatter that removes color codes from the message and label.
#[derive(Debug, Clone, Default)]
pub struct StripAnsiFormatter {
    pattern: Pattern,
}

impl StripAnsiFormatter {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl Formatter for StripAnsiFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let message = strip_ansi(&record.message);
        let levelname = strip_ansi(record.level.to_str());
        let mut line = self.pattern.render(record, &levelname, &message);
        append_trailers(&mut line, record);
        line
    }
}
