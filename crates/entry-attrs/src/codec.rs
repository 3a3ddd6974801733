//! # Transport Encoding
//!
//! The transport document is the map projection of [`EntryAttributes`] with
//! one change: `mode` is written as its raw bits instead of the display
//! string, so it can be read back exactly.
//!
//! ```text
//! {
//!   "atime": "2023-11-14T22:13:20Z",
//!   "mtime": "2023-11-14T22:13:20Z",
//!   "ctime": "2023-11-14T22:13:20Z",
//!   "mode":  420,
//!   "size":  4096,
//!   "meta":  { ... }
//! }
//! ```
//!
//! Every key is optional. Decoding is all-or-nothing: any bad attribute fails
//! the whole document.
//!
//! ## Meta asymmetry
//!
//! Encoding always writes `meta`, falling back to the structured attributes
//! when none was set. Decoding installs whatever `meta` it finds as an
//! explicit override. After a round trip `meta()` returns the same object,
//! but [`EntryAttributes::has_meta_override`] flips from false to true.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::attributes::{
    AttrValue, EntryAttributes, FileMode, JsonObject, ATIME, CTIME, META, MODE, MTIME, SIZE,
};
use crate::coerce::{Coerce, Coercer};
use crate::error::{AttrError, CoerceError, Result};

fn transport_map(attr: &EntryAttributes) -> BTreeMap<&'static str, AttrValue> {
    let mut map = attr.to_map(true);
    if let Some(mode) = attr.mode() {
        map.insert(MODE, AttrValue::Uint(mode.bits().into()));
    }
    map
}

/// Encodes `attr` into its transport document.
pub fn encode(attr: &EntryAttributes) -> JsonObject {
    transport_map(attr)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_json()))
        .collect()
}

pub fn to_json_string(attr: &EntryAttributes) -> Result<String> {
    Ok(serde_json::to_string(attr)?)
}

/// Decodes a transport document, coercing each attribute with `coercer`.
pub fn decode<C: Coerce + ?Sized>(value: Value, coercer: &C) -> Result<EntryAttributes> {
    let Value::Object(mut doc) = value else {
        tracing::debug!("rejecting entry attributes: not a JSON object");
        return Err(AttrError::NotAnObject);
    };

    let mut attr = EntryAttributes::new();
    for name in [ATIME, MTIME, CTIME] {
        if let Some(raw) = doc.get(name) {
            let t = coercer.to_time(raw).map_err(|e| coerce_failed(name, e))?;
            match name {
                ATIME => attr.set_atime(t),
                MTIME => attr.set_mtime(t),
                _ => attr.set_ctime(t),
            };
        }
    }
    if let Some(raw) = doc.get(MODE) {
        let mode = mode_from_value(raw).map_err(|e| coerce_failed(MODE, e))?;
        attr.set_mode(mode);
    }
    if let Some(raw) = doc.get(SIZE) {
        let size = coercer.to_size(raw).map_err(|e| coerce_failed(SIZE, e))?;
        attr.set_size(size);
    }
    if let Some(raw) = doc.remove(META) {
        let Value::Object(meta) = raw else {
            tracing::debug!("rejecting entry attributes: meta is not a JSON object");
            return Err(AttrError::MetaNotObject);
        };
        attr.set_meta_object(meta);
    }
    Ok(attr)
}

pub fn from_json_str(s: &str) -> Result<EntryAttributes> {
    decode(serde_json::from_str(s)?, &Coercer::default())
}

pub fn from_json_slice(raw: &[u8]) -> Result<EntryAttributes> {
    decode(serde_json::from_slice(raw)?, &Coercer::default())
}

fn coerce_failed(attr: &'static str, source: CoerceError) -> AttrError {
    tracing::debug!(attr, error = %source, "could not coerce entry attribute");
    AttrError::Coerce { attr, source }
}

// JSON numbers may arrive as floats; any whole value that fits in 32 bits is
// a valid mode.
fn mode_from_value(value: &Value) -> std::result::Result<FileMode, CoerceError> {
    let Value::Number(n) = value else {
        return Err(CoerceError::unexpected("numeric mode bits", value));
    };
    let bits = match n.as_u64() {
        Some(bits) => u32::try_from(bits).ok(),
        None => n
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64)
            .map(|f| f as u32),
    };
    bits.map(FileMode::new)
        .ok_or_else(|| CoerceError::unexpected("numeric mode bits", value))
}

impl Serialize for EntryAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        transport_map(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EntryAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode(value, &Coercer::default()).map_err(D::Error::custom)
    }
}
