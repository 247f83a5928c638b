//! Logger handle: level filter in front of a fan-out of sinks

use super::{
    appender::Appender,
    error::Result,
    fan_out::FanOut,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Used when an async logger is dropped without explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A structured logger.
///
/// The minimum level belongs to the handle, so independent loggers in one
/// process never affect each other. `Logger` is `Send + Sync`; share it
/// with `Arc` across threads.
///
/// In synchronous mode each call writes through the fan-out under a mutex.
/// In async mode calls enqueue into a bounded channel and never block; a
/// full queue drops the record and counts it in [`LoggerMetrics`].
pub struct Logger {
    min_level: LogLevel,
    sinks: Arc<Mutex<FanOut>>,
    sender: Option<Sender<LogEntry>>,
    worker: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sinks: Arc::new(Mutex::new(FanOut::new())),
            sender: None,
            worker: None,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Create a logger whose writes go through a worker thread.
    ///
    /// Falls back to synchronous delivery if the worker cannot be spawned.
    #[must_use]
    pub fn with_async(buffer_size: usize) -> Self {
        let mut logger = Self::new();
        let (sender, receiver) = bounded(buffer_size.max(1));
        let sinks = Arc::clone(&logger.sinks);
        let metrics = Arc::clone(&logger.metrics);

        let spawned = thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || Self::drain(&receiver, &sinks, &metrics));

        match spawned {
            Ok(handle) => {
                logger.sender = Some(sender);
                logger.worker = Some(handle);
            }
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Failed to spawn log writer thread: {}. Logging synchronously.",
                    e
                );
            }
        }

        logger
    }

    /// Worker loop: write everything queued, flush when the queue runs dry
    fn drain(receiver: &Receiver<LogEntry>, sinks: &Mutex<FanOut>, metrics: &LoggerMetrics) {
        while let Ok(entry) = receiver.recv() {
            let mut fan_out = sinks.lock();
            Self::deliver(&mut fan_out, &entry, metrics);
            for entry in receiver.try_iter() {
                Self::deliver(&mut fan_out, &entry, metrics);
            }
            if let Err(e) = fan_out.flush_all() {
                eprintln!("[LOGGER ERROR] Flush failed: {}", e);
            }
        }
    }

    fn deliver(sinks: &mut FanOut, entry: &LogEntry, metrics: &LoggerMetrics) {
        if sinks.write(entry) == 0 {
            metrics.record_logged();
        } else {
            metrics.record_dropped();
        }
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.sinks.lock().push(appender);
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Whether a record at `level` would be written
    #[inline]
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    #[must_use]
    pub fn is_async(&self) -> bool {
        self.sender.is_some()
    }

    /// Names of the attached sinks, in write order
    pub fn appender_names(&self) -> Vec<String> {
        self.sinks
            .lock()
            .names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.enabled(level) {
            return;
        }
        self.send_entry(LogEntry::new(level, message));
    }

    /// Log with structured key/value fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) {
        if !self.enabled(level) {
            return;
        }
        self.send_entry(LogEntry::new(level, message).with_context(context));
    }

    /// Write an already-built entry, subject to the level filter
    pub fn log_entry(&self, entry: LogEntry) {
        if self.enabled(entry.level) {
            self.send_entry(entry);
        }
    }

    fn send_entry(&self, entry: LogEntry) {
        match self.sender {
            Some(ref sender) => match sender.try_send(entry) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    self.metrics.record_queue_full();
                    let dropped = self.metrics.record_dropped();
                    if dropped == 0 || (dropped + 1) % 1000 == 0 {
                        eprintln!(
                            "[LOGGER WARNING] Queue full, {} logs dropped. \
                             Consider increasing the async buffer.",
                            dropped + 1
                        );
                    }
                }
                // Shutting down
                Err(TrySendError::Disconnected(_)) => {}
            },
            None => {
                let mut sinks = self.sinks.lock();
                Self::deliver(&mut sinks, &entry, &self.metrics);
            }
        }
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush every sink. In async mode records still queued are not waited for.
    pub fn flush(&self) -> Result<()> {
        self.sinks.lock().flush_all()
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn debug_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Debug, message, context);
    }

    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }

    /// Drain the async queue, stop the worker and flush all sinks.
    ///
    /// Returns `false` if the worker did not finish within `timeout` or a
    /// flush failed. Calling it on a synchronous logger only flushes.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        let drained = self.stop_worker(timeout);

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        drained
    }

    fn stop_worker(&mut self, timeout: Duration) -> bool {
        // Closing the channel lets the worker exit once it has drained
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if handle.join().is_err() {
                    eprintln!("[LOGGER ERROR] Log writer thread panicked during shutdown");
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Log writer thread did not finish within {:?}. \
                     Some logs may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use log_bootstrap::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::stderr())
///     .async_mode(1000)
///     .build();
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    async_buffer: Option<usize>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            async_buffer: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Deliver through a worker thread with a queue of `buffer_size` records.
    ///
    /// Synchronous when not called.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = match self.async_buffer {
            Some(size) => Logger::with_async(size),
            None => Logger::new(),
        };

        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        count: Arc<AtomicUsize>,
    }

    impl Appender for Counting {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            self.count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::writer("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn counting() -> (Counting, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (
            Counting {
                count: Arc::clone(&count),
            },
            count,
        )
    }

    #[test]
    fn test_builder_defaults_to_info() {
        let logger = Logger::builder().build();
        assert_eq!(logger.min_level(), LogLevel::Info);
        assert!(!logger.is_async());
        assert!(logger.appender_names().is_empty());
    }

    #[test]
    fn test_level_filter() {
        let (appender, count) = counting();
        let logger = Logger::builder()
            .min_level(LogLevel::Warn)
            .appender(appender)
            .build();

        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");
        logger.fatal("f");

        assert_eq!(count.load(Ordering::Relaxed), 3);
        assert_eq!(logger.metrics().total_logged(), 3);
    }

    #[test]
    fn test_levels_are_per_handle() {
        let quiet = Logger::builder().min_level(LogLevel::Info).build();
        let verbose = Logger::builder().min_level(LogLevel::Debug).build();

        assert!(!quiet.enabled(LogLevel::Debug));
        assert!(verbose.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_no_appenders_discards() {
        let logger = Logger::new();
        logger.info("into the void");
        assert!(logger.flush().is_ok());
        assert_eq!(logger.dropped_count(), 0);
    }

    #[test]
    fn test_failed_writes_are_counted() {
        let logger = Logger::builder().appender(Failing).build();
        for _ in 0..5 {
            logger.info("Test message");
        }
        assert_eq!(logger.dropped_count(), 5);
    }

    #[test]
    fn test_async_shutdown_drains_queue() {
        let (appender, count) = counting();
        let mut logger = Logger::builder().async_mode(1000).appender(appender).build();
        assert!(logger.is_async());

        for i in 0..100 {
            logger.info(format!("Message {}", i));
        }

        assert!(logger.shutdown(Duration::from_secs(5)));
        assert_eq!(count.load(Ordering::Relaxed), 100);
        assert_eq!(logger.metrics().total_logged(), 100);
    }

    #[test]
    fn test_logging_after_shutdown_falls_back_to_sync() {
        let (appender, count) = counting();
        let mut logger = Logger::builder().async_mode(10).appender(appender).build();

        assert!(logger.shutdown(Duration::from_secs(5)));
        logger.info("late");

        // Falls through to the synchronous path once the worker is gone
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }
}
