//! # log_bootstrap
//!
//! Builds a process logger from a small declarative configuration: console
//! output as colored text or JSON lines, plus an optional size-rolled log
//! file, all fed from a single level-filtered handle.
//!
//! ## Features
//!
//! - **One call setup**: [`configure`] turns a [`LoggingConfig`] into a [`Logger`]
//! - **Fan-out**: every record reaches each enabled sink in order
//! - **Rolling files**: size limit, backup count and age pruning, optional gzip
//! - **Thread safe**: share the handle with `Arc`, optionally write from a worker thread
//!
//! ```
//! use log_bootstrap::{configure, LoggingConfig};
//!
//! let config: LoggingConfig =
//!     serde_json::from_str(r#"{"enable_console_logging": true, "verbose": true}"#).unwrap();
//! let logger = configure(&config);
//! logger.debug("visible because verbose is set");
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod factory;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, JsonAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::config::LoggingConfig;
    pub use crate::core::{
        Appender, FanOut, FieldValue, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Result, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::factory::{configure, LoggerFactory};
}

pub use appenders::{ConsoleAppender, JsonAppender, RotatingFileAppender, RotationPolicy};
pub use config::LoggingConfig;
pub use core::{
    Appender, FanOut, FieldValue, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, Result, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use factory::{configure, startup_fields, LoggerFactory, STARTUP_MESSAGE};
