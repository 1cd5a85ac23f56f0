//! Positional extras, keyword extras and emission options for one log call

use super::log_value::LogValue;
use std::error::Error;
use std::fmt::Write as _;

/// Everything a log call carries besides its level and primary message.
///
/// Positional and keyword extras are folded into the message text. The
/// control options (`exc_info`, `stack_info`, `extra`) are handed to the
/// record instead.
///
/// # Examples
///
/// ```
/// use color_logger::{LogArgs, LogLevel, Registry};
///
/// let registry = Registry::builder().args(Vec::<String>::new()).build();
/// let log = registry.get_logger("svc");
/// log.log(
///     LogLevel::Info,
///     "request done",
///     LogArgs::new().arg("GET").kw("status", 200).extra("request_id", "r-17"),
/// )
/// .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogArgs {
    pub(crate) args: Vec<LogValue>,
    pub(crate) kwargs: Vec<(String, LogValue)>,
    pub(crate) exc_text: Option<String>,
    pub(crate) stack_info: bool,
    pub(crate) extra: Vec<(String, LogValue)>,
}

impl LogArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional extra
    #[must_use]
    pub fn arg(mut self, value: impl Into<LogValue>) -> Self {
        self.args.push(value.into());
        self
    }

    #[must_use]
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<LogValue>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Add a keyword extra, rendered as `key=value` after the message
    #[must_use]
    pub fn kw(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.kwargs.push((key.into(), value.into()));
        self
    }

    /// Attach an error and its cause chain to the record
    #[must_use]
    pub fn exc_info(mut self, err: &dyn Error) -> Self {
        self.exc_text = Some(render_error_chain(err));
        self
    }

    /// Capture the current stack into the record
    #[must_use]
    pub fn stack_info(mut self, enabled: bool) -> Self {
        self.stack_info = enabled;
        self
    }

    /// Attach a field to the record without adding it to the message
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn positional(&self) -> &[LogValue] {
        &self.args
    }

    pub fn keywords(&self) -> &[(String, LogValue)] {
        &self.kwargs
    }
}

/// `Error: <err>` followed by a numbered `Caused by:` list of sources
pub fn render_error_chain(err: &dyn Error) -> String {
    let mut text = format!("Error: {}", err);
    let mut source = err.source();
    let mut index = 0;
    if source.is_some() {
        text.push_str("\n\nCaused by:");
    }
    while let Some(cause) = source {
        let _ = write!(text, "\n    {}: {}", index, cause);
        index += 1;
        source = cause.source();
    }
    text
}
