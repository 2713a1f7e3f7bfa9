//! Helpers for the backend's wire conventions.
//!
//! The backend signals expected failures through sentinel bodies rather
//! than status codes alone: a bare JSON string (`"invalid-data"`) or an
//! error object (`{"error": "invalid-data"}`), sometimes on a 2xx and
//! sometimes on a 500. Both shapes are accepted here.

use serde_json::Value;

/// Does the response body carry the given failure sentinel?
pub(crate) fn has_sentinel(body: &str, sentinel: &str) -> bool {
    let trimmed = body.trim();
    if trimmed == sentinel {
        return true;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => s == sentinel,
        Ok(Value::Object(map)) => map.get("error").and_then(Value::as_str) == Some(sentinel),
        _ => false,
    }
}
