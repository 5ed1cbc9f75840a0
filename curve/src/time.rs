//! Timestamps are local wall-clock times stored as `YYYY-MM-DD HH:mm:ss`.
//! The persisted data depends on this exact pattern, so every read and write
//! goes through here.

use chrono::NaiveDateTime;
use chrono::Timelike;

pub type Timestamp = NaiveDateTime;

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format(ts: &Timestamp) -> String {
    ts.format(FORMAT).to_string()
}

pub fn parse(s: &str) -> Result<Timestamp, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), FORMAT)
}

/// Drop sub-second precision; stored timestamps only carry whole seconds.
pub fn truncate(ts: Timestamp) -> Timestamp {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// `#[serde(with = "crate::time::serde_format")]` for `Timestamp` fields.
pub mod serde_format {
    use super::Timestamp;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse(&raw).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}"))
        })
    }
}
