//! File logging example
//!
//! Adds a log file after the loggers already exist. The console keeps its
//! colors; the file receives the same lines without escape codes.
//!
//! Run with: cargo run --example file_logging

use color_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Color Logger - File Logging Example ===\n");

    let api = get_logger("app.api");
    let db = get_logger("app.db");
    set_level(LogLevel::Debug);

    api.info("Before file logging, console only");

    // Every existing logger gets its own sink for the same file
    enable_file_logging("application.log", None, None)?;

    api.debug("Loading configuration...");
    api.info("Configuration loaded successfully");
    db.warning("Using default pool size");

    // An error-only file on a single logger
    db.enable_file_logging("errors.log", Some(LogLevel::Error), Some("%(levelname)s %(name)s: %(message)s"))?;

    for i in 1..=3 {
        color_logger::info!(db, "Processing batch %d/3", i)?;
    }
    db.error("Replica unreachable");

    color_logger::registry().flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'errors.log' for the file output");

    Ok(())
}
