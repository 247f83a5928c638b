//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod fan_out;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use fan_out::FanOut;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
