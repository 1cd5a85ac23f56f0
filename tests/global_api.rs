//! The process-wide registry, exercised from a single test so that no other
//! test in this binary observes its state.

use color_logger::prelude::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_global_registry_lifecycle() {
    let capture = CaptureBuffer::new();
    caplog_integrate(&capture.handle());

    // The default logger is registered under the crate name
    let default = color_logger::logger();
    assert_eq!(default.name(), color_logger::DEFAULT_LOGGER_NAME);
    assert!(Arc::ptr_eq(&default, &get_logger(color_logger::DEFAULT_LOGGER_NAME)));

    let a = get_logger("global.a");
    assert!(Arc::ptr_eq(&a, &get_logger("global.a")));
    assert_eq!(a.level(), default.level());

    let b = Logger::builder("global.b")
        .level(LogLevel::Critical)
        .build()
        .expect("Failed to build logger");
    assert!(matches!(
        Logger::builder("global.b").build(),
        Err(LoggerError::AlreadyRegistered { .. })
    ));

    set_level(LogLevel::Warning);
    assert_eq!(default.level(), LogLevel::Warning);
    assert_eq!(a.level(), LogLevel::Warning);
    assert_eq!(b.level(), LogLevel::Warning);

    a.info("suppressed");
    b.warning("kept");
    assert_eq!(capture.messages(), vec!["kept"]);

    // Loggers created after a broadcast take the broadcast level
    set_level(LogLevel::Debug);
    let late = get_logger("global.late");
    assert_eq!(late.level(), LogLevel::Debug);
    late.debug("late debug");
    assert_eq!(capture.len(), 2);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("global.log");
    enable_file_logging(&log_file, Some(LogLevel::Error), Some("%(name)s:%(levelname)s:%(message)s"))
        .expect("Failed to enable file logging");

    a.warning("console only");
    b.error("to file");
    color_logger::registry().flush().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content, "global.b:ERROR:to file\n");
    assert!(color_logger::root()
        .sinks()
        .iter()
        .any(|sink| sink.level() == LogLevel::Error));
}
