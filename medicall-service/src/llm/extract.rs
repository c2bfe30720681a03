//! Pulls a JSON object out of a free-text model reply.
//!
//! Models wrap JSON in markdown fences or surround it with prose, so the
//! reply is cut down to the span between the first `{` and the last `}`
//! before parsing.

use serde_json::{Map, Value};

use crate::error::ExtractError;

const FENCE: &str = "```";

pub fn try_extract_json_object(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    let mut content = raw.trim();
    if let Some((_, after_fence)) = content.split_once(FENCE) {
        content = after_fence.trim();
    }

    let start = content.find('{').ok_or(ExtractError::NoJsonObject)?;
    let end = content.rfind('}').ok_or(ExtractError::NoJsonObject)?;
    if end < start {
        return Err(ExtractError::NoJsonObject);
    }

    match serde_json::from_str::<Value>(&content[start..=end])? {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractError::NotAnObject),
    }
}

/// Lenient form of [`try_extract_json_object`]: any failure yields an empty map
pub fn extract_json_object(raw: &str) -> Map<String, Value> {
    try_extract_json_object(raw).unwrap_or_default()
}

/// Reads a scalar field as text. Models return numbers as either JSON strings
/// or JSON numbers, both are accepted.
pub fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads an array of strings, skipping non-string entries
pub fn string_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = map.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    )
}
