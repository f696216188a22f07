//! JSON export of a snapshot.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

use inspector_protocols::ElementSnapshot;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No element data to export")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Pretty-printed snapshot with an `exportedAt` timestamp appended.
pub fn export_json(snapshot: &ElementSnapshot, now: DateTime<Utc>) -> Result<String, ExportError> {
    let mut value = serde_json::to_value(snapshot)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "exportedAt".to_string(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// `element-inspector-<millis>.json`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("element-inspector-{}.json", now.timestamp_millis())
}
