//! Console-Text appender: human-readable lines, standard error by default

use super::BoxedWriter;
use crate::core::{output_format, Appender, LogEntry, LoggerError, Result, TimestampFormat};
use std::io::Write;

pub struct ConsoleAppender {
    out: BoxedWriter,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    /// Colored text on standard error
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    /// Colored text on any writer
    pub fn with_writer(out: BoxedWriter) -> Self {
        Self {
            out,
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Enable or disable the ANSI-colored level column
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use log_bootstrap::appenders::ConsoleAppender;
    /// use log_bootstrap::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::stderr()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = output_format::format_text(entry, &self.timestamp_format, self.use_colors);
        line.push('\n');

        self.out
            .write_all(line.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| LoggerError::io_operation("writing to console", "console write failed", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::SharedBuffer;
    use crate::core::{LogContext, LogLevel};

    #[test]
    fn test_plain_text_line() {
        let buffer = SharedBuffer::new();
        let mut appender = ConsoleAppender::with_writer(Box::new(buffer.clone())).with_colors(false);

        let entry = LogEntry::new(LogLevel::Info, "Server started")
            .with_context(LogContext::new().with_field("port", 8080));
        appender.append(&entry).unwrap();

        let output = buffer.contents();
        assert!(output.ends_with("[INFO ] Server started port=8080\n"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_colored_by_default() {
        let buffer = SharedBuffer::new();
        let mut appender = ConsoleAppender::with_writer(Box::new(buffer.clone()));
        assert!(appender.uses_colors());

        appender.append(&LogEntry::new(LogLevel::Warn, "careful")).unwrap();

        assert!(buffer.contents().contains("\x1b[33mWARN \x1b[0m"));
    }

    #[test]
    fn test_one_line_per_record() {
        let buffer = SharedBuffer::new();
        let mut appender = ConsoleAppender::with_writer(Box::new(buffer.clone()));

        for i in 0..3 {
            appender
                .append(&LogEntry::new(LogLevel::Debug, format!("line {}\nforged", i)))
                .unwrap();
        }

        assert_eq!(buffer.contents().lines().count(), 3);
    }
}
