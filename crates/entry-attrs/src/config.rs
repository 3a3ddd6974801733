//! # Configuration
//!
//! Coercion settings are managed by [`confique`], which layers environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `time_formats` | | `["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]` | Extra layouts for string times, read as UTC |
//! | `epoch_strings` | `ENTRY_ATTRS_EPOCH_STRINGS` | `true` | Accept digit strings as epoch seconds |
//!
//! RFC 3339 strings and numeric epoch seconds are always accepted.

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_time_formats() -> Vec<String> {
    vec!["%Y-%m-%d %H:%M:%S".to_string(), "%Y-%m-%dT%H:%M:%S".to_string()]
}

/// Settings for the default [`Coercer`](crate::Coercer).
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CoerceConfig {
    /// chrono layouts tried, in order, after RFC 3339 fails.
    #[config(default = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"])]
    pub time_formats: Vec<String>,

    /// Whether a string like "1700000000" is read as epoch seconds.
    #[config(env = "ENTRY_ATTRS_EPOCH_STRINGS", default = true)]
    pub epoch_strings: bool,
}

impl Default for CoerceConfig {
    fn default() -> Self {
        Self {
            time_formats: default_time_formats(),
            epoch_strings: true,
        }
    }
}

impl CoerceConfig {
    /// Loads from the environment, then `path` if given, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        tracing::debug!(path = ?path, "loaded coercion config");
        Ok(config)
    }
}
