//! The `meta` attribute's JSON object form.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::json_type_name;

/// A JSON object, as produced by `serde_json`.
pub type JsonObject = Map<String, Value>;

/// Serializes `value` into a JSON object.
///
/// # Panics
///
/// Panics if `value` fails to serialize or serializes to anything other than
/// an object. Meta values come from plugin code, not from external input, so
/// a non-object here is a bug in the caller.
pub fn to_json_object<T: Serialize + ?Sized>(value: &T) -> JsonObject {
    match serde_json::to_value(value) {
        Ok(Value::Object(obj)) => obj,
        Ok(other) => panic!(
            "meta must serialize to a JSON object, got {}",
            json_type_name(&other)
        ),
        Err(e) => panic!("meta could not be serialized: {e}"),
    }
}

/// Parses already-encoded JSON bytes into a JSON object.
///
/// # Panics
///
/// Same contract as [`to_json_object`]: invalid JSON or a non-object panics.
pub fn json_object_from_slice(raw: &[u8]) -> JsonObject {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(obj)) => obj,
        Ok(other) => panic!(
            "meta must be a JSON object, got {}",
            json_type_name(&other)
        ),
        Err(e) => panic!("meta is not valid JSON: {e}"),
    }
}
