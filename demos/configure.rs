//! Factory example
//!
//! Builds loggers from JSON configuration documents, the way an application
//! would after loading its settings file.
//!
//! Run with: cargo run --example configure

use log_bootstrap::prelude::*;
use log_bootstrap::{debug, info, warn};

fn main() -> Result<()> {
    println!("=== log_bootstrap - Configure Example ===\n");

    println!("1. Colored text on stderr, verbose:");
    let config: LoggingConfig = serde_json::from_str(
        r#"{
            "enable_console_logging": true,
            "verbose": true
        }"#,
    )?;
    let logger = configure(&config);
    debug!(logger, "cache warmed in {} ms", 42);
    warn!(logger, { "free_mb" => 512 }, "disk space low");
    drop(logger);

    println!("\n2. JSON lines on stdout, quiet:");
    let config: LoggingConfig = serde_json::from_str(
        r#"{
            "enable_console_logging": true,
            "encode_logs_as_json": true
        }"#,
    )?;
    let logger = configure(&config);
    debug!(logger, "not shown without verbose");
    info!(logger, { "port" => 8080 }, "listening");
    drop(logger);

    println!("\n3. Nothing enabled:");
    let logger = configure(&LoggingConfig::default());
    logger.error("discarded");
    println!("   (no output expected)");

    Ok(())
}
