//! Attribute value types.
//!
//! This module defines the runtime representation of a single attribute as
//! it appears in the map projection of [`EntryAttributes`](super::EntryAttributes).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::meta::JsonObject;

/// Runtime representation of a projected attribute value.
///
/// Serializes untagged, so a map of these renders as a plain JSON object
/// with times as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A moment in time (`atime`, `mtime`, `ctime`)
    Time(DateTime<Utc>),

    /// Human-readable text (the display form of `mode`)
    Text(String),

    /// Unsigned integer (`size`, or raw `mode` bits in the transport form)
    Uint(u64),

    /// Free-form JSON object (`meta`)
    Object(JsonObject),
}

impl AttrValue {
    /// Get the moment if this is a Time.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Get the string if this is Text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer if this is a Uint.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            AttrValue::Uint(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the object if this is an Object.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            AttrValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Convert to a plain JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Time(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            AttrValue::Text(s) => Value::String(s.clone()),
            AttrValue::Uint(n) => Value::from(*n),
            AttrValue::Object(obj) => Value::Object(obj.clone()),
        }
    }
}
