//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink: serializes records and writes them somewhere.
///
/// One `append` call must write the whole record in a single write so
/// concurrent records never interleave.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
