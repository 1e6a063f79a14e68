use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder text substituted when an entry cannot be serialized.
/// The entry keeps its original timestamp and is never dropped silently.
pub const MISSING_MESSAGE_TEXT: &str = "<< Missing log message >>";

/// One queued log message, immutable once created.
///
/// This is the canonical representation of an entry from the public logging
/// surface through to batch composition. `level` and `fields` are omitted
/// from the wire form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Epoch milliseconds at the moment the caller logged the message.
    pub timestamp: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, String>>,
}

impl LogEntry {
    pub fn new(
        timestamp: i64,
        text: impl Into<String>,
        level: Option<LogLevel>,
        fields: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            timestamp,
            text: text.into(),
            level,
            fields,
        }
    }

    /// Sentinel entry standing in for a message that failed to serialize.
    pub fn missing_message(timestamp: i64) -> Self {
        Self {
            timestamp,
            text: MISSING_MESSAGE_TEXT.to_string(),
            level: None,
            fields: None,
        }
    }
}
