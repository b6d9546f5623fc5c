//! UI helper functions

use chrono::DateTime;

/// Format a millisecond timestamp as HH:MM for message rows
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "??:??".to_string())
}

/// Render a classification payload as a short display label
///
/// The backend does not commit to a shape here; strings display as-is,
/// anything else as compact JSON.
pub fn classification_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
