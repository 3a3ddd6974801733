//! # entry-attrs
//!
//! Attributes for entries in a resource-abstraction layer. An entry models
//! some external object (a process, a container, a file) exposed by a
//! plugin, and its attributes are the handful of facts every consumer
//! understands: access, modification and creation times, mode, size, plus a
//! free-form `meta` object for everything else.
//!
//! ## Layers
//!
//! - [`attributes`]: [`EntryAttributes`], the record itself, with presence
//!   tracking and a map projection for display.
//! - [`codec`]: the JSON transport document, and the serde impls built on it.
//! - [`coerce`]: turns loosely-typed times and sizes into canonical values.
//! - [`config`]: settings for the default coercer.
//!
//! ## Errors
//!
//! Bad external data (a document that is not an object, an attribute that
//! won't coerce) comes back as [`AttrError`]. A plugin handing
//! [`EntryAttributes::set_meta`] something that isn't a JSON object is a bug
//! in the plugin and panics.
//!
//! ```
//! use entry_attrs::codec;
//!
//! let attr = codec::from_json_str(r#"{"size": 42, "mode": 493}"#)?;
//! assert_eq!(attr.size(), Some(42));
//! assert_eq!(attr.mode().map(|m| m.to_string()).as_deref(), Some("-rwxr-xr-x"));
//! # Ok::<(), entry_attrs::AttrError>(())
//! ```

pub mod attributes;
pub mod codec;
pub mod coerce;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use attributes::{AttrValue, EntryAttributes, FileMode, JsonObject};
pub use coerce::{Coerce, Coercer};
pub use config::CoerceConfig;
pub use error::{AttrError, CoerceError, Result};
