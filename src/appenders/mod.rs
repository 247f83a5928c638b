//! Appender implementations

pub mod console;
pub mod json;
pub mod memory;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use json::JsonAppender;
pub use memory::SharedBuffer;
pub use rotating_file::{create_log_dir, Backup, RotatingFileAppender, RotationPolicy};

pub use crate::core::Appender;

/// Output stream owned by a console sink
pub type BoxedWriter = Box<dyn std::io::Write + Send + Sync>;
