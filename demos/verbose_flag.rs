//! Verbose flag example
//!
//! Loggers start at INFO; passing `-v` or `--verbose` starts them at DEBUG.
//!
//! Run with: cargo run --example verbose_flag
//!      or:  cargo run --example verbose_flag -- -v

use color_logger::prelude::*;

fn main() -> Result<()> {
    let log = get_logger("demo.module");

    log.debug("Debug message, only shown with -v");
    log.info("Info message");
    log.warning("Warning message");
    log.error("Error message");
    log.critical("Critical message");

    color_logger::info!(log, "Positional extras:", "a", 1, 2.5)?;
    color_logger::info!(log, "Processed %d of %d items", 7, 10; elapsed_ms = 12.5)?;

    if let Err(err) = "not a number".parse::<u32>() {
        log.exception(&err);
    }

    println!("\nLevels after broadcast to WARNING:");
    set_level(LogLevel::Warning);
    log.info("Not shown anymore");
    log.warning("Still shown");

    color_logger::registry().flush()
}
