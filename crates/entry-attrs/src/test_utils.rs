use chrono::{DateTime, TimeZone, Utc};

use crate::attributes::{EntryAttributes, FileMode};

/// A UTC moment `secs` seconds after the epoch.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .expect("timestamp in range")
}

/// A file-like record with every structured attribute set and no meta.
pub fn sample_attributes() -> EntryAttributes {
    let mut attr = EntryAttributes::new();
    attr.set_atime(ts(1_700_000_300))
        .set_mtime(ts(1_700_000_200))
        .set_ctime(ts(1_700_000_100))
        .set_mode(FileMode::new(0o644))
        .set_size(4096);
    attr
}

/// A directory record, as a filesystem plugin would report it.
pub fn sample_dir_attributes() -> EntryAttributes {
    let mut attr = EntryAttributes::new();
    attr.set_mtime(ts(1_650_000_000))
        .set_mode(FileMode::from_unix(0o040755))
        .set_size(0);
    attr
}
