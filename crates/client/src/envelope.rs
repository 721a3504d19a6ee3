//! Parsing of the service's response bodies.
//!
//! The list endpoint answers `{ "success": true, "data": [...] }`, but a bare
//! array is accepted as well. Anything else reads as an empty list.

use api_types::expense::Expense;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClientError;

/// Shapes a list payload can take.
#[derive(Debug, PartialEq)]
enum ListShape {
    /// `{ "data": [...] }`
    Wrapped(Vec<Value>),
    /// `[...]`
    Bare(Vec<Value>),
    Malformed,
}

impl ListShape {
    fn detect(payload: Value) -> Self {
        match payload {
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Array(items)) => Self::Wrapped(items),
                _ => Self::Malformed,
            },
            Value::Array(items) => Self::Bare(items),
            _ => Self::Malformed,
        }
    }
}

/// Turns a list response body into records. Never fails: a body that is not
/// one of the known shapes gives an empty list, and records that do not parse
/// are skipped.
pub fn normalize_list(body: &[u8]) -> Vec<Expense> {
    let payload = match serde_json::from_slice::<Value>(body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!("list response is not JSON: {err}");
            return Vec::new();
        }
    };

    let items = match ListShape::detect(payload) {
        ListShape::Wrapped(items) | ListShape::Bare(items) => items,
        ListShape::Malformed => {
            tracing::warn!("list response has an unexpected shape");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Expense>(item) {
            Ok(expense) => Some(expense),
            Err(err) => {
                tracing::warn!("skipping malformed expense: {err}");
                None
            }
        })
        .collect()
}

/// Reads a single-record response, unwrapping `{ "data": ... }` when present.
pub(crate) fn unwrap_data<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|err| ClientError::Decode(err.to_string()))?;
    let inner = match payload {
        Value::Object(mut object) if object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(inner).map_err(|err| ClientError::Decode(err.to_string()))
}

/// Extracts `message` from an error body, if any.
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    payload
        .get("message")
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}
