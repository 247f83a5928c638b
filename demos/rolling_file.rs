//! Rolling file example
//!
//! Writes enough records to roll the log file a few times and lists what is
//! left on disk.
//!
//! Run with: cargo run --example rolling_file

use log_bootstrap::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== log_bootstrap - Rolling File Example ===\n");

    let directory = std::env::temp_dir().join("log_bootstrap_demo");
    let config = LoggingConfig {
        file_enabled: true,
        directory: directory.display().to_string(),
        filename: "demo.log".to_string(),
        max_size_mb: 1,
        max_backups: 3,
        max_age_days: 7,
        compress: true,
        ..Default::default()
    };

    let logger = configure(&config);
    let payload = "-".repeat(512);
    for i in 0..10_000 {
        logger.info_with_context(
            payload.as_str(),
            LogContext::new().with_field("seq", i),
        );
    }
    logger.flush()?;

    println!("Files in {}:", directory.display());
    let mut names: Vec<_> = fs::read_dir(&directory)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    for name in names {
        let size = fs::metadata(directory.join(&name))?.len();
        println!("   {:<16} {:>9} bytes", name, size);
    }

    Ok(())
}
