//! Declarative logging configuration
//!
//! Loading is left to the embedding application; any serde format works.
//! Every key is optional and defaults to off / empty / zero.

use crate::appenders::RotationPolicy;
use crate::core::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the factory should build
///
/// File-related fields are only read when `file_enabled` is set; zero or
/// negative limits select the rolling sink's defaults.
///
/// # Example
///
/// ```
/// use log_bootstrap::LoggingConfig;
///
/// let config: LoggingConfig = serde_json::from_str(r#"{
///     "enable_console_logging": true,
///     "encode_logs_as_json": true,
///     "file_logging_enabled": true,
///     "directory": "/var/log/svc",
///     "filename": "svc.log",
///     "max_size": 10,
///     "max_backups": 5,
///     "max_age": 30
/// }"#).unwrap();
///
/// assert!(config.json_encoding);
/// assert_eq!(config.max_size_mb, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write to the console
    #[serde(rename = "enable_console_logging")]
    pub console_enabled: bool,

    /// Emit Debug records
    pub verbose: bool,

    /// JSON lines on stdout instead of text on stderr
    #[serde(rename = "encode_logs_as_json")]
    pub json_encoding: bool,

    /// Also write to a rolling file
    #[serde(rename = "file_logging_enabled")]
    pub file_enabled: bool,

    /// Directory holding the log file; created on demand and must not be empty
    pub directory: String,

    /// Name of the active log file inside `directory`
    pub filename: String,

    /// Size in MB before the file is rolled
    #[serde(rename = "max_size")]
    pub max_size_mb: i64,

    /// Rolled files to keep
    pub max_backups: i64,

    /// Days to keep a rolled file
    #[serde(rename = "max_age")]
    pub max_age_days: i64,

    /// Plain console text; only meaningful with console logging on
    #[serde(rename = "console_no_color")]
    pub no_color: bool,

    /// Gzip rolled files
    pub compress: bool,

    /// Queue size for background delivery; 0 writes on the calling thread
    pub async_buffer: usize,
}

impl LoggingConfig {
    /// `Debug` when verbose, `Info` otherwise
    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_verbose(self.verbose)
    }

    /// `directory/filename`
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.directory).join(&self.filename)
    }

    #[must_use]
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::from_limits(self.max_size_mb, self.max_backups, self.max_age_days)
            .with_compression(self.compress)
    }
}
