//! Logging macros with `format!`-style messages and optional fields.
//!
//! The level check runs before the message is formatted, so disabled
//! records cost a comparison.
//!
//! # Examples
//!
//! ```
//! use log_bootstrap::prelude::*;
//! use log_bootstrap::info;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Structured fields go in braces before the message
//! info!(logger, { "port" => port, "tls" => false }, "listener ready");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use log_bootstrap::prelude::*;
/// # let logger = Logger::new();
/// use log_bootstrap::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, { "attempt" => 3 }, "retrying {}", "upload");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, { $($key:literal => $value:expr),* $(,)? }, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            let context = $crate::LogContext::new()
                $(.with_field($key, $value))*;
            logger.log_with_context(level, format!($($arg)+), context);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use log_bootstrap::prelude::*;
/// # let logger = Logger::new();
/// use log_bootstrap::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use log_bootstrap::prelude::*;
/// # let logger = Logger::new();
/// use log_bootstrap::error;
/// error!(logger, { "path" => "/var/log" }, "can't open {}", "app.log");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
