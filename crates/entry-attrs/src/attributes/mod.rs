//! # Entry Attributes
//!
//! [`EntryAttributes`] describes the metadata of one entry: the external
//! object (process, container, file, ...) a plugin exposes. Every attribute
//! is optional, and the record keeps "not reported" apart from "reported as
//! zero" wherever zero is meaningful data.
//!
//! ## Attributes
//!
//! | Name | Type | Present when |
//! |------|------|--------------|
//! | `atime` | `DateTime<Utc>` | set to a moment other than [`ZERO_TIME`] |
//! | `mtime` | `DateTime<Utc>` | set to a moment other than [`ZERO_TIME`] |
//! | `ctime` | `DateTime<Utc>` | set to a moment other than [`ZERO_TIME`] |
//! | `mode` | [`FileMode`] | set, whatever the bits |
//! | `size` | `u64` | set, including to `0` |
//! | `meta` | [`JsonObject`] | always readable; falls back to the other attributes |
//!
//! A time set to [`ZERO_TIME`] (0001-01-01T00:00:00Z) reads back as absent.
//! The Unix epoch is an ordinary moment: an mtime of `0` is reported.
//!
//! ## Building
//!
//! Setters take `&mut self` and return it, so they chain in any order:
//!
//! ```
//! use chrono::Utc;
//! use entry_attrs::{EntryAttributes, FileMode};
//!
//! let mut attr = EntryAttributes::new();
//! attr.set_mtime(Utc::now())
//!     .set_mode(FileMode::new(0o644))
//!     .set_size(0);
//! assert!(attr.has_size());
//! assert!(!attr.has_atime());
//! ```

mod meta;
mod mode;
mod value;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use meta::{json_object_from_slice, to_json_object, JsonObject};
pub use mode::FileMode;
pub use value::AttrValue;

pub const ATIME: &str = "atime";
pub const MTIME: &str = "mtime";
pub const CTIME: &str = "ctime";
pub const MODE: &str = "mode";
pub const SIZE: &str = "size";
pub const META: &str = "meta";

/// Every attribute name, in transport order.
pub const ATTRIBUTE_NAMES: &[&str] = &[ATIME, MTIME, CTIME, MODE, SIZE, META];

/// Seconds from the Unix epoch back to 0001-01-01T00:00:00Z.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

/// The moment that counts as "no time reported": midnight UTC, January 1st
/// of year 1.
pub const ZERO_TIME: DateTime<Utc> = match DateTime::<Utc>::from_timestamp(ZERO_TIME_SECS, 0) {
    Some(t) => t,
    None => panic!("year 1 is within chrono's range"),
};

/// An entry's attributes.
///
/// Fields are private so that presence can only change through the setters.
/// A struct literal like `EntryAttributes { size: 15, .. }` would otherwise
/// be one typo away from an entry that silently reports no size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryAttributes {
    atime: Option<DateTime<Utc>>,
    mtime: Option<DateTime<Utc>>,
    ctime: Option<DateTime<Utc>>,
    mode: Option<FileMode>,
    size: Option<u64>,
    meta: Option<JsonObject>,
}

fn non_zero(t: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (t != ZERO_TIME).then_some(t)
}

impl EntryAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the entry has a last access time.
    pub fn has_atime(&self) -> bool {
        self.atime.is_some()
    }

    /// The entry's last access time.
    pub fn atime(&self) -> Option<DateTime<Utc>> {
        self.atime
    }

    /// Sets the last access time. [`ZERO_TIME`] clears it.
    pub fn set_atime(&mut self, atime: DateTime<Utc>) -> &mut Self {
        self.atime = non_zero(atime);
        self
    }

    /// Returns true if the entry has a last modified time.
    pub fn has_mtime(&self) -> bool {
        self.mtime.is_some()
    }

    /// The entry's last modified time.
    pub fn mtime(&self) -> Option<DateTime<Utc>> {
        self.mtime
    }

    /// Sets the last modified time. [`ZERO_TIME`] clears it.
    pub fn set_mtime(&mut self, mtime: DateTime<Utc>) -> &mut Self {
        self.mtime = non_zero(mtime);
        self
    }

    /// Returns true if the entry has a creation time.
    pub fn has_ctime(&self) -> bool {
        self.ctime.is_some()
    }

    /// The entry's creation time.
    pub fn ctime(&self) -> Option<DateTime<Utc>> {
        self.ctime
    }

    /// Sets the creation time. [`ZERO_TIME`] clears it.
    pub fn set_ctime(&mut self, ctime: DateTime<Utc>) -> &mut Self {
        self.ctime = non_zero(ctime);
        self
    }

    pub fn has_mode(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<FileMode> {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FileMode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn has_size(&self) -> bool {
        self.size.is_some()
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Sets the size. `0` is a real size and marks the attribute present.
    pub fn set_size(&mut self, size: u64) -> &mut Self {
        self.size = Some(size);
        self
    }

    /// The entry's meta attribute.
    ///
    /// Returns the object installed by [`set_meta`](Self::set_meta) if there
    /// is one. Otherwise returns the other attributes as a JSON object, i.e.
    /// the JSON form of `to_map(false)`.
    pub fn meta(&self) -> JsonObject {
        match &self.meta {
            Some(meta) => meta.clone(),
            None => {
                tracing::trace!("meta not set, deriving it from the other attributes");
                self.to_map(false)
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect()
            }
        }
    }

    /// Returns true if meta was provided explicitly rather than derived.
    pub fn has_meta_override(&self) -> bool {
        self.meta.is_some()
    }

    /// Sets the meta attribute to `obj` serialized as a JSON object.
    ///
    /// This is typically the raw object a plugin got back from the system it
    /// wraps, e.g. a container description.
    ///
    /// # Panics
    ///
    /// Panics if `obj` does not serialize to a JSON object.
    pub fn set_meta<T: Serialize + ?Sized>(&mut self, obj: &T) -> &mut Self {
        self.meta = Some(to_json_object(obj));
        self
    }

    /// Sets the meta attribute from already-encoded JSON.
    ///
    /// # Panics
    ///
    /// Panics if `raw` is not a JSON object.
    pub fn set_meta_json(&mut self, raw: &[u8]) -> &mut Self {
        self.meta = Some(json_object_from_slice(raw));
        self
    }

    pub(crate) fn set_meta_object(&mut self, obj: JsonObject) -> &mut Self {
        self.meta = Some(obj);
        self
    }

    /// True if nothing was reported and no meta was set.
    pub fn is_empty(&self) -> bool {
        self.atime.is_none()
            && self.mtime.is_none()
            && self.ctime.is_none()
            && self.mode.is_none()
            && self.size.is_none()
            && self.meta.is_none()
    }

    /// Projects the present attributes into a map.
    ///
    /// `mode` appears in its display form (`-rwxr-xr-x`) because raw mode
    /// bits mean different things on different systems. With `include_meta`
    /// the map always carries a `meta` entry, derived if necessary.
    pub fn to_map(&self, include_meta: bool) -> BTreeMap<&'static str, AttrValue> {
        let mut map = BTreeMap::new();
        if let Some(atime) = self.atime {
            map.insert(ATIME, AttrValue::Time(atime));
        }
        if let Some(mtime) = self.mtime {
            map.insert(MTIME, AttrValue::Time(mtime));
        }
        if let Some(ctime) = self.ctime {
            map.insert(CTIME, AttrValue::Time(ctime));
        }
        if let Some(mode) = self.mode {
            map.insert(MODE, AttrValue::Text(mode.to_string()));
        }
        if let Some(size) = self.size {
            map.insert(SIZE, AttrValue::Uint(size));
        }
        if include_meta {
            map.insert(META, AttrValue::Object(self.meta()));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_attributes, ts};
    use serde_json::json;

    #[test]
    fn new_record_is_empty() {
        let attr = EntryAttributes::new();
        assert!(attr.is_empty());
        assert!(!attr.has_atime());
        assert!(!attr.has_mtime());
        assert!(!attr.has_ctime());
        assert!(!attr.has_mode());
        assert!(!attr.has_size());
        assert!(!attr.has_meta_override());
        assert_eq!(attr.size(), None);
    }

    #[test]
    fn zero_size_is_present() {
        let mut attr = EntryAttributes::new();
        attr.set_size(0);
        assert!(attr.has_size());
        assert_eq!(attr.size(), Some(0));
        assert!(!EntryAttributes::new().has_size());
    }

    #[test]
    fn zero_mode_is_present() {
        let mut attr = EntryAttributes::new();
        attr.set_mode(FileMode::new(0));
        assert!(attr.has_mode());
        assert_eq!(attr.to_map(false).get(MODE), Some(&AttrValue::Text("----------".into())));
    }

    #[test]
    fn zero_time_reads_as_absent() {
        let mut set = EntryAttributes::new();
        set.set_atime(ZERO_TIME).set_mtime(ZERO_TIME).set_ctime(ZERO_TIME);
        let unset = EntryAttributes::new();

        assert!(!set.has_atime());
        assert!(!set.has_mtime());
        assert!(!set.has_ctime());
        assert_eq!(set, unset);
    }

    #[test]
    fn zero_time_is_year_one() {
        assert_eq!(ZERO_TIME.to_rfc3339(), "0001-01-01T00:00:00+00:00");
    }

    #[test]
    fn unix_epoch_is_a_real_time() {
        let mut attr = EntryAttributes::new();
        attr.set_atime(ts(0)).set_mtime(ts(0)).set_ctime(ts(0));
        assert!(attr.has_atime());
        assert!(attr.has_mtime());
        assert!(attr.has_ctime());
        assert_eq!(attr.mtime(), Some(DateTime::<Utc>::UNIX_EPOCH));
    }

    #[test]
    fn zero_time_clears_an_earlier_time() {
        let mut attr = EntryAttributes::new();
        attr.set_mtime(ts(1_700_000_000));
        assert!(attr.has_mtime());
        attr.set_mtime(ZERO_TIME);
        assert!(!attr.has_mtime());
    }

    #[test]
    fn setters_chain_in_any_order() {
        let mut a = EntryAttributes::new();
        a.set_size(10).set_ctime(ts(1)).set_mode(FileMode::new(0o600));
        let mut b = EntryAttributes::new();
        b.set_mode(FileMode::new(0o600)).set_size(10).set_ctime(ts(1));
        assert_eq!(a, b);
    }

    #[test]
    fn to_map_contains_only_present_attributes() {
        let mut attr = EntryAttributes::new();
        attr.set_mtime(ts(1_700_000_000)).set_size(42);
        let map = attr.to_map(false);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(MTIME), Some(&AttrValue::Time(ts(1_700_000_000))));
        assert_eq!(map.get(SIZE), Some(&AttrValue::Uint(42)));
        assert!(!map.contains_key(ATIME));
        assert!(!map.contains_key(MODE));
    }

    #[test]
    fn to_map_renders_mode_as_display_string() {
        let mut attr = EntryAttributes::new();
        attr.set_mode(FileMode::new(FileMode::DIR | 0o755));
        assert_eq!(
            attr.to_map(false).get(MODE).and_then(AttrValue::as_str),
            Some("drwxr-xr-x")
        );
    }

    #[test]
    fn to_map_meta_key_follows_flag() {
        let attr = sample_attributes();
        assert!(!attr.to_map(false).contains_key(META));
        assert!(attr.to_map(true).contains_key(META));
    }

    #[test]
    fn to_map_with_meta_on_empty_record() {
        let map = EntryAttributes::new().to_map(true);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(META), Some(&AttrValue::Object(JsonObject::new())));
    }

    #[test]
    fn meta_falls_back_to_other_attributes() {
        let mut attr = EntryAttributes::new();
        attr.set_mode(FileMode::new(0o755)).set_size(7);
        let meta = attr.meta();

        assert_eq!(serde_json::Value::Object(meta), json!({"mode": "-rwxr-xr-x", "size": 7}));
        assert!(!attr.has_meta_override());
    }

    #[test]
    fn explicit_meta_wins_over_fallback() {
        let mut attr = EntryAttributes::new();
        attr.set_size(7).set_meta(&json!({"image": "alpine"}));
        assert!(attr.has_meta_override());
        assert_eq!(serde_json::Value::Object(attr.meta()), json!({"image": "alpine"}));
        assert!(!attr.is_empty());
    }

    #[test]
    fn set_meta_json_installs_override() {
        let mut attr = EntryAttributes::new();
        attr.set_meta_json(br#"{"pid": 1}"#);
        assert_eq!(attr.meta().get("pid"), Some(&json!(1)));
    }

    #[test]
    #[should_panic(expected = "meta must serialize to a JSON object")]
    fn set_meta_with_non_object_panics() {
        EntryAttributes::new().set_meta(&[1, 2, 3]);
    }
}
