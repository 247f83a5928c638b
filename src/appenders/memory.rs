//! In-memory writer that can be handed to a sink and read back later

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable byte buffer implementing [`Write`]; all clones share storage.
///
/// # Example
///
/// ```
/// use log_bootstrap::appenders::{JsonAppender, SharedBuffer};
/// use log_bootstrap::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .appender(JsonAppender::with_writer(Box::new(buffer.clone())))
///     .build();
/// logger.info("captured");
/// assert!(buffer.contents().contains("captured"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
