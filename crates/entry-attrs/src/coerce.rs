//! Coercion of loosely-typed JSON values.
//!
//! Plugins and remote sources report times and sizes in whatever shape their
//! upstream API uses: epoch numbers, RFC 3339 strings, numeric strings. The
//! [`Coerce`] trait turns those into canonical values; [`Coercer`] is the
//! stock implementation.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde_json::{Number, Value};

use crate::config::CoerceConfig;
use crate::error::CoerceError;

/// Converts decoded JSON values into canonical attribute values.
pub trait Coerce {
    /// Must accept at least numeric epoch seconds and string timestamps.
    fn to_time(&self, value: &Value) -> Result<DateTime<Utc>, CoerceError>;

    /// Must accept at least non-negative integers and numeric strings.
    fn to_size(&self, value: &Value) -> Result<u64, CoerceError>;
}

/// The default [`Coerce`] implementation.
#[derive(Debug, Clone, Default)]
pub struct Coercer {
    config: CoerceConfig,
}

impl Coercer {
    pub fn new(config: CoerceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoerceConfig {
        &self.config
    }

    fn parse_time_str(&self, s: &str) -> Result<DateTime<Utc>, CoerceError> {
        let s = s.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(s) {
            return Ok(t.with_timezone(&Utc));
        }
        // RFC 3339 stops at year 9999; chrono writes later years as `+10000-...`.
        if let Ok(t) = s.parse::<DateTime<FixedOffset>>() {
            return Ok(t.with_timezone(&Utc));
        }
        for layout in &self.config.time_formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
                return Ok(naive.and_utc());
            }
        }
        if self.config.epoch_strings && !s.is_empty() {
            if let Ok(secs) = s.parse::<i64>() {
                return epoch_secs(secs, 0).ok_or_else(|| CoerceError::InvalidTime(s.to_string()));
            }
        }
        Err(CoerceError::InvalidTime(s.to_string()))
    }
}

fn epoch_secs(secs: i64, nanos: u32) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, nanos).single()
}

fn epoch_from_number(n: &Number) -> Option<DateTime<Utc>> {
    if let Some(secs) = n.as_i64() {
        return epoch_secs(secs, 0);
    }
    let f = n.as_f64()?;
    if !f.is_finite() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return None;
    }
    let secs = f.floor();
    let nanos = ((f - secs) * 1e9).round().min(999_999_999.0) as u32;
    epoch_secs(secs as i64, nanos)
}

fn size_from_number(n: &Number) -> Option<u64> {
    if let Some(size) = n.as_u64() {
        return Some(size);
    }
    // Some decoders hand back whole numbers as floats.
    let f = n.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

impl Coerce for Coercer {
    fn to_time(&self, value: &Value) -> Result<DateTime<Utc>, CoerceError> {
        match value {
            Value::Number(n) => {
                epoch_from_number(n).ok_or_else(|| CoerceError::InvalidTime(n.to_string()))
            }
            Value::String(s) => self.parse_time_str(s),
            other => Err(CoerceError::unexpected("a time", other)),
        }
    }

    fn to_size(&self, value: &Value) -> Result<u64, CoerceError> {
        match value {
            Value::Number(n) => {
                size_from_number(n).ok_or_else(|| CoerceError::InvalidSize(n.to_string()))
            }
            Value::String(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| CoerceError::InvalidSize(format!("{s:?}"))),
            other => Err(CoerceError::unexpected("a size", other)),
        }
    }
}
