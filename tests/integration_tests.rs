//! Integration tests for the logger facade
//!
//! These tests verify:
//! - Level gating on capture sinks
//! - File sinks with their own levels, free of color codes
//! - Level broadcasts versus local level changes
//! - Message and keyword assembly through the macros
//! - Colorized console output

use color_logger::prelude::*;
use color_logger::{info, warning};
use parking_lot::Mutex;
use regex::Regex;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;

fn registry() -> Registry {
    Registry::builder().args(Vec::<String>::new()).build()
}

fn captured(registry: &Registry) -> CaptureBuffer {
    let capture = CaptureBuffer::new();
    registry.caplog_integrate(&capture.handle());
    capture
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("console output is utf-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_default_level_hides_debug() {
    let registry = registry();
    let capture = captured(&registry);

    let svc = Logger::builder("svc").build_in(&registry).expect("Failed to build logger");
    svc.debug("hidden");
    svc.info("shown");

    let text = capture.text();
    assert!(text.contains("shown"));
    assert!(!text.contains("hidden"));
}

#[test]
fn test_gating_for_every_level() {
    let registry = registry();
    let capture = captured(&registry);
    let logger = registry.get_logger("gate");

    for threshold in [LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error, LogLevel::Critical] {
        capture.clear();
        logger.set_level(threshold);

        for level in &LogLevel::ALL[1..] {
            logger.log(*level, format!("at {}", level), LogArgs::new()).unwrap();
        }

        let messages = capture.messages();
        for level in &LogLevel::ALL[1..] {
            let message = format!("at {}", level);
            assert_eq!(
                messages.contains(&message),
                *level >= threshold,
                "{} with threshold {}",
                level,
                threshold
            );
        }
    }
}

#[test]
fn test_file_sink_with_higher_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("svc.log");

    let registry = registry();
    let svc = registry.get_logger("svc");
    svc.set_level(LogLevel::Debug);
    svc.enable_file_logging(&log_file, Some(LogLevel::Error), None)
        .expect("Failed to attach file sink");

    svc.warning("w");
    svc.error("e");
    svc.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[ERROR]: e"));
    assert!(!content.contains("]: w"));
}

#[test]
fn test_file_line_layout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("layout.log");

    let registry = registry();
    let svc = registry.get_logger("svc");
    svc.enable_file_logging(&log_file, None, None).unwrap();
    svc.warning("disk almost full");

    let content = fs::read_to_string(&log_file).unwrap();
    let layout = Regex::new(
        r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}\] - svc:\d+ \[WARNING\]: disk almost full$",
    )
    .unwrap();
    assert!(layout.is_match(content.trim_end()), "unexpected line: {:?}", content);
}

#[test]
fn test_file_output_has_no_ansi_codes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("plain.log");

    let registry = registry();
    let svc = registry.get_logger("svc");
    svc.enable_file_logging(&log_file, None, None).unwrap();

    svc.error("\x1b[31mred\x1b[0m alert");
    info!(svc, "value %s", "\x1b[1;32mgreen\x1b[0m").unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(!content.contains('\x1b'));
    assert!(content.contains("[ERROR]: red alert"));
    assert!(content.contains("value green"));
}

#[test]
fn test_file_logging_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("append.log");
    fs::write(&log_file, "existing line\n").unwrap();

    let registry = registry();
    let svc = registry.get_logger("svc");
    svc.enable_file_logging(&log_file, None, Some("%(levelname)s %(message)s")).unwrap();
    svc.info("new line");

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content, "existing line\nINFO new line\n");
}

#[test]
fn test_file_sink_bad_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("missing").join("dir").join("x.log");

    let registry = registry();
    let result = registry.get_logger("svc").enable_file_logging(&log_file, None, None);
    assert!(matches!(result, Err(LoggerError::FileSink { .. })));
}

#[test]
fn test_broadcast_silences_all_loggers() {
    let registry = registry();
    let capture = captured(&registry);
    let a = registry.get_logger("a");
    let b = registry.get_logger("b");

    registry.set_level(LogLevel::Error);
    a.debug("a debug");
    b.debug("b debug");

    assert!(capture.is_empty());
    for logger in [&a, &b] {
        assert_eq!(logger.level(), LogLevel::Error);
        for sink in logger.sinks().iter().filter(|sink| !sink.is_capture()) {
            assert_eq!(sink.level(), LogLevel::Error);
        }
    }

    a.error("a error");
    assert_eq!(capture.messages(), vec!["a error"]);
}

#[test]
fn test_local_set_level_stays_local() {
    let registry = registry();
    let a = registry.get_logger("a");
    let b = registry.get_logger("b");
    let default_level = registry.default_logger().level();

    a.set_level(LogLevel::Critical);

    assert_eq!(a.level(), LogLevel::Critical);
    assert_eq!(b.level(), default_level);
    assert_eq!(registry.default_logger().level(), default_level);
}

#[test]
fn test_retroactive_file_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("all.log");

    let registry = registry();
    let quiet = registry.get_logger("quiet");
    let chatty = registry.get_logger("chatty");
    quiet.set_level(LogLevel::Error);
    chatty.set_level(LogLevel::Debug);

    registry.enable_file_logging(&log_file, None, Some("%(name)s %(message)s")).unwrap();

    quiet.warning("dropped");
    quiet.error("kept");
    chatty.debug("details");
    registry.flush().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["quiet kept", "chatty details"]);
    assert!(registry.root().sinks().iter().any(|sink| sink.name() == "file"));
}

#[test]
fn test_message_assembly() {
    let registry = registry();
    let capture = captured(&registry);
    let logger = registry.get_logger("asm");

    info!(logger, "msg", "a", "b").unwrap();
    info!(logger, "val=%s", "x").unwrap();
    info!(logger, "msg"; k1 = 1, k2 = "y").unwrap();
    info!(logger, "%05.1f%% done", 42.31; stage = "copy").unwrap();

    let texts: Vec<String> = capture.records().into_iter().map(|r| r.text).collect();
    assert!(texts[0].ends_with("msg a b"));
    assert!(texts[1].ends_with("val=x"));
    assert!(texts[2].ends_with("msg k1=1 k2=y"));
    assert!(texts[3].ends_with("042.3% done stage=copy"));
}

#[test]
fn test_placeholder_mismatch_is_reported() {
    let registry = registry();
    let capture = captured(&registry);
    let logger = registry.get_logger("asm");

    let result = warning!(logger, "%d items", "many");
    assert!(matches!(result, Err(LoggerError::Format { .. })));
    assert!(capture.is_empty());
}

#[test]
fn test_exception_carries_cause_chain() {
    let registry = registry();
    let capture = captured(&registry);
    let logger = registry.get_logger("exc");

    let err = io::Error::new(io::ErrorKind::NotFound, "config.toml missing");
    logger.exception(&err);

    let records = capture.records();
    assert_eq!(records[0].level, LogLevel::Error);
    assert_eq!(records[0].message, "config.toml missing");
    assert!(records[0].text.contains("\nError: config.toml missing"));
}

#[test]
fn test_console_colors_only_level_label() {
    let colored_out = SharedBuffer::default();
    let plain_out = SharedBuffer::default();
    let pattern = Pattern::parse("%(levelname)s %(message)s").unwrap();

    let registry = registry();
    let logger = registry.get_logger("console");
    logger.add_sink(SinkHandle::new(
        ConsoleSink::with_writer(
            colored_out.clone(),
            ColorFormatter::new(pattern.clone()).with_color_mode(ColorMode::Always),
        ),
        LogLevel::Debug,
    ));
    logger.add_sink(SinkHandle::new(
        ConsoleSink::with_writer(
            plain_out.clone(),
            ColorFormatter::new(pattern).with_color_mode(ColorMode::Never),
        ),
        LogLevel::Debug,
    ));

    logger.error("boom");

    assert_eq!(colored_out.contents(), "\x1b[31mERROR\x1b[0m boom\n");
    assert_eq!(plain_out.contents(), "ERROR boom\n");
}

#[test]
fn test_configure_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");
    let json = format!(
        r#"{{"level": "DEBUG", "format": "%(levelname)s|%(message)s", "files": [{{"path": {:?}, "level": "WARNING"}}]}}"#,
        log_file.to_str().unwrap()
    );
    let config: LoggerConfig = serde_json::from_str(&json).unwrap();

    let registry = registry();
    let logger = registry.configure("worker", &config).unwrap();
    logger.info("below file level");
    logger.warning("to file");

    assert_eq!(logger.level(), LogLevel::Debug);
    assert_eq!(fs::read_to_string(&log_file).unwrap(), "WARNING|to file\n");
    assert!(matches!(
        registry.configure("worker", &config),
        Err(LoggerError::AlreadyRegistered { .. })
    ));
}

#[test]
fn test_concurrent_logging() {
    let registry = registry();
    let capture = captured(&registry);
    let logger = registry.get_logger("threads");

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..25 {
                    info!(logger, "thread %d message %d", t, i).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    assert_eq!(capture.len(), 100);
}
