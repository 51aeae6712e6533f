use chrono::{DateTime, Utc};
use serde_json::Value;

use wishes_types::api::Wish;

/// Convert one untrusted stored document into a well-typed `Wish`.
/// Every field is optional at rest; missing or wrong-shaped values are
/// absorbed by defaults, so this never fails.
pub fn normalize(doc: &Value, name_placeholder: &str) -> Wish {
    Wish {
        id: decode_id(doc),
        name: doc
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| name_placeholder.to_string()),
        relation: doc
            .get("relation")
            .and_then(Value::as_str)
            .map(str::to_string),
        message: doc
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        is_public: doc.get("is_public").map(truthy).unwrap_or(true),
        created_at: decode_created_at(doc),
    }
}

fn decode_id(doc: &Value) -> String {
    match doc.get("_id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(v) if !v.is_null() => v.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Timestamp decoding shared with the listing sort. Anything that is not an
/// RFC 3339 string counts as absent rather than an error.
pub fn decode_created_at(doc: &Value) -> Option<DateTime<Utc>> {
    doc.get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
