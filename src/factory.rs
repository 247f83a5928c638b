//! Builds a ready-to-use [`Logger`] from a [`LoggingConfig`]
//!
//! Sinks are composed in a fixed order: at most one console sink (JSON on
//! stdout or text on stderr), then the rolling file. A file sink that
//! cannot be set up is reported on the fallback logger and left out; the
//! factory never fails.

use crate::appenders::{
    create_log_dir, Appender, BoxedWriter, ConsoleAppender, JsonAppender, RotatingFileAppender,
};
use crate::config::LoggingConfig;
use crate::core::{LogContext, Logger};
use std::io;
use std::path::Path;

/// Message of the record emitted right after construction
pub const STARTUP_MESSAGE: &str = "logging configured";

/// One-shot logger factory with injectable streams and fallback sink.
///
/// # Example
///
/// ```
/// use log_bootstrap::{LoggerFactory, LoggingConfig};
/// use log_bootstrap::appenders::SharedBuffer;
///
/// let stdout = SharedBuffer::new();
/// let config = LoggingConfig {
///     console_enabled: true,
///     json_encoding: true,
///     ..Default::default()
/// };
///
/// let logger = LoggerFactory::new()
///     .with_stdout(Box::new(stdout.clone()))
///     .configure(&config);
/// logger.info("ready");
///
/// assert_eq!(stdout.contents().lines().count(), 2);
/// ```
pub struct LoggerFactory {
    stdout: BoxedWriter,
    stderr: BoxedWriter,
    fallback: Logger,
}

impl LoggerFactory {
    /// Process stdout/stderr, with setup errors reported as text on stderr
    pub fn new() -> Self {
        Self {
            stdout: Box::new(std::io::stdout()),
            stderr: Box::new(std::io::stderr()),
            fallback: Logger::builder().appender(ConsoleAppender::stderr()).build(),
        }
    }

    /// Stream used by the JSON console sink
    #[must_use]
    pub fn with_stdout(mut self, out: BoxedWriter) -> Self {
        self.stdout = out;
        self
    }

    /// Stream used by the text console sink
    #[must_use]
    pub fn with_stderr(mut self, out: BoxedWriter) -> Self {
        self.stderr = out;
        self
    }

    /// Sink that receives the factory's own setup errors
    #[must_use]
    pub fn with_fallback<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.fallback = Logger::builder().appender(appender).build();
        self
    }

    /// Build the logger described by `config` and emit the startup record
    pub fn configure(self, config: &LoggingConfig) -> Logger {
        let Self {
            stdout,
            stderr,
            fallback,
        } = self;

        let mut builder = Logger::builder().min_level(config.min_level());
        if config.async_buffer > 0 {
            builder = builder.async_mode(config.async_buffer);
        }

        if config.console_enabled {
            builder = if config.json_encoding {
                builder.appender(JsonAppender::with_writer(stdout))
            } else {
                builder.appender(ConsoleAppender::with_writer(stderr).with_colors(!config.no_color))
            };
        }

        if config.file_enabled {
            if let Some(appender) = open_rolling_file(config, &fallback) {
                builder = builder.appender(appender);
            }
        }

        let logger = builder.build();
        logger.info_with_context(STARTUP_MESSAGE, startup_fields(config));
        logger
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure with the process's own stdout/stderr
///
/// # Example
///
/// ```
/// use log_bootstrap::{configure, LoggingConfig};
///
/// // Nothing enabled: every record is discarded
/// let logger = configure(&LoggingConfig::default());
/// logger.info("nowhere");
/// ```
pub fn configure(config: &LoggingConfig) -> Logger {
    LoggerFactory::new().configure(config)
}

/// Fields of the startup record, one per configuration value
pub fn startup_fields(config: &LoggingConfig) -> LogContext {
    LogContext::new()
        .with_field("fileLogging", config.file_enabled)
        .with_field("jsonLogOutput", config.json_encoding)
        .with_field("consoleLog", config.console_enabled)
        .with_field("verbose", config.verbose)
        .with_field("logDirectory", &config.directory)
        .with_field("fileName", &config.filename)
        .with_field("maxSizeMB", config.max_size_mb)
        .with_field("maxBackups", config.max_backups)
        .with_field("maxAgeInDays", config.max_age_days)
}

/// Create the configured log directory; an empty path is an error, never the cwd
fn prepare_log_dir(directory: &str) -> io::Result<()> {
    if directory.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no logging directory configured",
        ));
    }
    create_log_dir(Path::new(directory))
}

fn open_rolling_file(config: &LoggingConfig, fallback: &Logger) -> Option<RotatingFileAppender> {
    if let Err(e) = prepare_log_dir(&config.directory) {
        fallback.error_with_context(
            "can't create logging directory",
            LogContext::new()
                .with_field("error", e.to_string())
                .with_field("path", &config.directory),
        );
        return None;
    }

    let path = config.file_path();
    match RotatingFileAppender::with_policy(&path, config.rotation_policy()) {
        Ok(appender) => Some(appender),
        Err(e) => {
            fallback.error_with_context(
                "can't open log file",
                LogContext::new()
                    .with_field("error", e.to_string())
                    .with_field("path", path.display().to_string()),
            );
            None
        }
    }
}
