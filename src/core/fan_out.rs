//! Fan-out writer: one record, every sink

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_entry::LogEntry,
};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Ordered set of sinks that all receive every record.
///
/// An empty fan-out discards records and reports success.
#[derive(Default)]
pub struct FanOut {
    appenders: Vec<Box<dyn Appender>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self {
            appenders: Vec::new(),
        }
    }

    pub fn push(&mut self, appender: Box<dyn Appender>) {
        self.appenders.push(appender);
    }

    pub fn len(&self) -> usize {
        self.appenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appenders.is_empty()
    }

    /// Names of the sinks, in write order
    pub fn names(&self) -> Vec<&str> {
        self.appenders.iter().map(|a| a.name()).collect()
    }

    /// Write `entry` to every sink and return how many failed.
    ///
    /// A sink that errors or panics is reported on stderr and skipped; the
    /// remaining sinks still receive the record.
    pub fn write(&mut self, entry: &LogEntry) -> usize {
        let mut failures = 0;

        for appender in self.appenders.iter_mut() {
            match catch_unwind(AssertUnwindSafe(|| appender.append(entry))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                    failures += 1;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                         Other appenders continue to function.",
                        appender.name(),
                        panic_message(panic_info.as_ref())
                    );
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Flush every sink, continuing past failures. Returns the first error.
    pub fn flush_all(&mut self) -> Result<()> {
        let mut first_error = None;

        for appender in self.appenders.iter_mut() {
            let outcome = match catch_unwind(AssertUnwindSafe(|| appender.flush())) {
                Ok(result) => result,
                Err(panic_info) => Err(LoggerError::writer(format!(
                    "appender '{}' panicked during flush: {}",
                    appender.name(),
                    panic_message(panic_info.as_ref())
                ))),
            };

            if let Err(e) = outcome {
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
