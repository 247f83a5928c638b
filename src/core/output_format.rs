//! Record rendering shared by the sinks
//!
//! - Text: `[2025-01-08T10:30:45.123Z] [INFO ] Request processed status=200`,
//!   optionally with an ANSI-colored level
//! - Json: `{"level":"INFO","message":"Request processed","status":200,"timestamp":"..."}`,
//!   one object per line with caller fields at the top level

use super::error::Result;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;

/// Keys every JSON record carries. Caller fields with these names are shadowed.
pub const TIMESTAMP_KEY: &str = "timestamp";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "message";

/// Wrap `text` in the ANSI foreground sequence for `color`.
///
/// Applied unconditionally: whether to color is the sink's decision, not the terminal's.
pub fn paint(text: &str, color: colored::Color) -> String {
    format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
}

pub fn format_text(entry: &LogEntry, timestamp_format: &TimestampFormat, colorize: bool) -> String {
    let padded = format!("{:5}", entry.level.to_str());
    let level_str = if colorize {
        paint(&padded, entry.level.color_code())
    } else {
        padded
    };

    let base = format!(
        "[{}] [{}] {}",
        timestamp_format.format(&entry.timestamp),
        level_str,
        entry.message
    );

    if entry.context.is_empty() {
        base
    } else {
        format!("{} {}", base, entry.context.format_fields())
    }
}

pub fn format_json(entry: &LogEntry, timestamp_format: &TimestampFormat) -> Result<String> {
    let mut json_obj = serde_json::Map::new();

    for (key, value) in entry.context.fields() {
        json_obj.insert(key.clone(), value.to_json_value());
    }

    json_obj.insert(
        TIMESTAMP_KEY.to_string(),
        timestamp_format.to_json_value(&entry.timestamp),
    );
    json_obj.insert(
        LEVEL_KEY.to_string(),
        serde_json::Value::String(entry.level.to_str().to_string()),
    );
    json_obj.insert(
        MESSAGE_KEY.to_string(),
        serde_json::Value::String(entry.message.clone()),
    );

    Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
}
