//! Logging macros for positional and keyword extras.
//!
//! Positional extras follow the message, separated by commas; keyword extras
//! follow a `;` as `key = value` pairs. Each macro evaluates to the
//! `Result<()>` of [`Logger::log`](crate::Logger::log).
//!
//! # Examples
//!
//! ```
//! use color_logger::prelude::*;
//! use color_logger::info;
//!
//! let registry = Registry::builder().args(Vec::<String>::new()).build();
//! let log = registry.get_logger("server");
//!
//! // Basic logging
//! info!(log, "Server started").unwrap();
//!
//! // Percent placeholders
//! info!(log, "Listening on port %d", 8080).unwrap();
//!
//! // Extras without placeholders are appended, keywords come last
//! info!(log, "Request", "GET", "/health"; status = 200, took_ms = 1.5).unwrap();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use color_logger::prelude::*;
/// # let log = Registry::builder().args(Vec::<String>::new()).build().get_logger("svc");
/// use color_logger::log;
/// log!(log, LogLevel::Info, "Simple message").unwrap();
/// log!(log, LogLevel::Error, "Error code: %s", 500).unwrap();
/// log!(log, LogLevel::Warning, "Retrying"; attempt = 3).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)* $(; $($key:ident = $value:expr),+)?) => {
        $logger.log(
            $level,
            $msg,
            $crate::LogArgs::new()
                $(.arg($arg))*
                $($(.kw(stringify!($key), $value))+)?,
        )
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($rest)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($rest)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($rest)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($rest)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($rest)+)
    };
}
