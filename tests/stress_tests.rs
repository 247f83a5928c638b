//! Stress tests for concurrent delivery
//!
//! These tests verify:
//! - Records from many threads never interleave inside a line
//! - The async queue drops instead of blocking and counts what it dropped
//! - Rotation stays consistent under concurrent writers

use log_bootstrap::appenders::{JsonAppender, RotatingFileAppender, RotationPolicy, SharedBuffer};
use log_bootstrap::core::{LogContext, Logger};
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn spawn_writers(logger: &Arc<Logger>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info_with_context(
                        "stress",
                        LogContext::new().with_field("thread", t).with_field("i", i),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
}

#[test]
fn test_concurrent_lines_never_interleave() {
    let buffer = SharedBuffer::new();
    let logger = Arc::new(
        Logger::builder()
            .appender(JsonAppender::with_writer(Box::new(buffer.clone())))
            .build(),
    );

    spawn_writers(&logger);

    let mut seen = HashSet::new();
    for line in buffer.contents().lines() {
        let record: serde_json::Value =
            serde_json::from_str(line).expect("line is a complete JSON object");
        let key = (
            record["thread"].as_i64().expect("thread field"),
            record["i"].as_i64().expect("i field"),
        );
        assert!(seen.insert(key), "duplicate record {:?}", key);
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
}

#[test]
fn test_async_small_queue_drops_without_blocking() {
    let buffer = SharedBuffer::new();
    let mut logger = Logger::builder()
        .appender(JsonAppender::with_writer(Box::new(buffer.clone())))
        .async_mode(4)
        .build();

    for i in 0..20_000 {
        logger.info(format!("burst {}", i));
    }
    assert!(logger.shutdown(Duration::from_secs(10)));

    let written = buffer.contents().lines().count() as u64;
    let dropped = logger.dropped_count();
    assert_eq!(written + dropped, 20_000);
    assert_eq!(logger.metrics().total_logged(), written);
    assert_eq!(logger.metrics().queue_full_events(), dropped);
}

#[test]
fn test_concurrent_rotation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("stress.log");
    let policy = RotationPolicy::new()
        .with_max_size(64 * 1024)
        .with_max_backups(3);
    let appender = RotatingFileAppender::with_policy(&path, policy).expect("Failed to create appender");

    let logger = Arc::new(Logger::builder().appender(appender).build());
    spawn_writers(&logger);
    logger.flush().expect("Failed to flush");

    let names: Vec<String> = fs::read_dir(temp_dir.path())
        .expect("Failed to read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"stress.log".to_string()));
    assert!(names.len() <= 4, "too many files: {:?}", names);

    for name in names {
        let content = fs::read_to_string(temp_dir.path().join(&name)).expect("Failed to read");
        for line in content.lines() {
            serde_json::from_str::<serde_json::Value>(line).expect("rotated line is intact JSON");
        }
    }
}
