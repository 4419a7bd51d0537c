//! The single boundary where wire JSON turns into typed records.
//!
//! Endpoints answer either with the raw entity/collection or with an envelope
//! `{ "success": bool, "data": .., "error": .. }`. Nothing past this module
//! branches on which shape arrived.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{error::ApiErrorBody, wire::EmbeddedJson};

use crate::error::{ClientError, ClientResult, GENERIC_FAILURE_MESSAGE};

pub fn unwrap_envelope(body: Value) -> ClientResult<Value> {
    let mut map = match body {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    let Some(success) = map.get("success").and_then(Value::as_bool) else {
        return Ok(Value::Object(map));
    };

    if !success {
        let message = extract_error_message(&Value::Object(map.clone()), GENERIC_FAILURE_MESSAGE);
        return Err(ClientError::Status {
            status: 200,
            message,
        });
    }

    match map.remove("data") {
        Some(data) => Ok(data),
        None => {
            map.remove("success");
            Ok(Value::Object(map))
        }
    }
}

pub fn decode<T: DeserializeOwned>(body: Value) -> ClientResult<T> {
    let payload = unwrap_envelope(body)?;
    serde_json::from_value(payload).map_err(ClientError::from)
}

/// Lists are sometimes wrapped again as `{ "items": [...] }`.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> ClientResult<Vec<T>> {
    let payload = unwrap_envelope(body)?;
    let items = match payload {
        Value::Null => return Ok(Vec::new()),
        Value::Object(mut map) => ["items", "results", "data"]
            .into_iter()
            .find_map(|key| map.remove(key))
            .unwrap_or(Value::Array(Vec::new())),
        other => other,
    };
    serde_json::from_value(items).map_err(ClientError::from)
}

pub fn extract_error_message(body: &Value, fallback: &str) -> String {
    match body {
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        Value::Object(_) => serde_json::from_value::<ApiErrorBody>(body.clone())
            .ok()
            .and_then(|parsed| parsed.message())
            .unwrap_or_else(|| fallback.to_string()),
        _ => fallback.to_string(),
    }
}

/// Decodes a field that may hold an object or a JSON-encoded string. A
/// malformed string is reported as [`EmbeddedJson::Malformed`], never raised.
pub fn decode_embedded<T: DeserializeOwned>(raw: &Value) -> EmbeddedJson<T> {
    EmbeddedJson::from_value(raw)
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
