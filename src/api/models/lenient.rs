//! Tolerant decoders for backend timestamps.
//!
//! The backend emits ISO-8601 local date-times without an offset. Anything
//! that does not parse (numbers, arrays, garbage) decodes as `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Nullable;

/// Decodes a timestamp key that was present; `null` and garbage both reset.
pub(super) fn nullable_timestamp<'de, D>(
    deserializer: D,
) -> Result<Nullable<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(Nullable::from_present(
        raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp),
    ))
}

pub(super) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_date))
}

pub(super) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|parsed| parsed.naive_utc())
        })
}

pub(super) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(trimmed).map(|stamp| stamp.date()))
}
