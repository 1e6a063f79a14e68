use crate::device::DeviceContext;
use crate::domain::LogEntry;
use serde_json::{Map, Value, json};
use tracing::warn;

/// Serializes a queue snapshot plus identity and context fields into one
/// wire payload.
///
/// Composition never fails a delivery cycle: an entry that refuses to
/// serialize is degraded to the missing-message sentinel with its original
/// timestamp instead of aborting the batch.
#[derive(Debug, Clone, Default)]
pub struct BatchComposer;

impl BatchComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(
        &self,
        application_id: &str,
        session_id: &str,
        context: &DeviceContext,
        entries: &[LogEntry],
    ) -> String {
        let messages: Vec<Value> = entries.iter().map(render_entry).collect();

        let mut payload = Map::new();
        payload.insert("id".to_string(), json!(application_id));
        payload.insert("device_id".to_string(), json!(context.device_id));
        payload.insert("session_id".to_string(), json!(session_id));
        payload.insert("messages".to_string(), Value::Array(messages));
        if let Some(name) = &context.device_name
            && !name.is_empty()
        {
            payload.insert("name".to_string(), json!(name));
        }
        payload.insert("device_info".to_string(), device_info(context));

        Value::Object(payload).to_string()
    }
}

fn render_entry(entry: &LogEntry) -> Value {
    match serde_json::to_value(entry) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, timestamp = entry.timestamp, "entry failed to serialize; substituting sentinel");
            serde_json::to_value(LogEntry::missing_message(entry.timestamp))
                .unwrap_or_else(|_| json!({"timestamp": entry.timestamp}))
        }
    }
}

fn device_info(context: &DeviceContext) -> Value {
    let mut info = Map::new();
    info.insert("os".to_string(), json!(context.os));
    info.insert("os_version".to_string(), json!(context.os_version));
    info.insert("device_type".to_string(), json!(context.device_type));
    info.insert("app_version".to_string(), json!(context.app_version));
    if context.build_version > 0 {
        info.insert("build_version".to_string(), json!(context.build_version));
    }
    Value::Object(info)
}
