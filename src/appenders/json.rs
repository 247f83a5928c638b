//! Console-JSON appender for structured logging
//!
//! Writes each entry as a single-line JSON object (JSONL), standard output
//! by default. Compatible with log collectors such as ELK or Loki.

use super::BoxedWriter;
use crate::core::{output_format, Appender, LogEntry, LoggerError, Result, TimestampFormat};
use std::io::Write;

pub struct JsonAppender {
    out: BoxedWriter,
    timestamp_format: TimestampFormat,
}

impl JsonAppender {
    /// JSON lines on standard output
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    /// JSON lines on any writer
    pub fn with_writer(out: BoxedWriter) -> Self {
        Self {
            out,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for JsonAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for JsonAppender {
    fn name(&self) -> &str {
        "json"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = output_format::format_json(entry, &self.timestamp_format)?;
        line.push('\n');

        self.out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| LoggerError::io_operation("writing JSON record", "stream write failed", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::SharedBuffer;
    use crate::core::{LogContext, LogLevel};

    #[test]
    fn test_json_appender() -> Result<()> {
        let buffer = SharedBuffer::new();
        let mut appender = JsonAppender::with_writer(Box::new(buffer.clone()));

        let context = LogContext::new()
            .with_field("user_id", 123)
            .with_field("action", "login");
        let entry = LogEntry::new(LogLevel::Info, "User logged in").with_context(context);

        appender.append(&entry)?;

        let parsed: serde_json::Value = serde_json::from_str(buffer.contents().trim_end())?;
        assert_eq!(parsed["message"], "User logged in");
        assert_eq!(parsed["user_id"], 123);
        assert_eq!(parsed["action"], "login");
        Ok(())
    }

    #[test]
    fn test_json_appender_multiple_entries() -> Result<()> {
        let buffer = SharedBuffer::new();
        let mut appender = JsonAppender::with_writer(Box::new(buffer.clone()))
            .with_timestamp_format(TimestampFormat::UnixMillis);

        for i in 0..5 {
            let entry = LogEntry::new(LogLevel::Debug, format!("Iteration {}", i))
                .with_field("iteration", i);
            appender.append(&entry)?;
        }

        let content = buffer.contents();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert!(parsed["message"].is_string());
            assert_eq!(parsed["level"], "DEBUG");
            assert!(parsed["timestamp"].is_number());
        }
        Ok(())
    }
}
