//! Wire timestamps.
//!
//! The API writes times in the classic `Wed Aug 27 13:08:45 +0000 2008`
//! layout; search-era endpoints use RFC 2822 and newer ones RFC 3339, trend
//! snapshots are keyed by a bare UTC date-time, and a few legacy fields carry
//! Unix seconds. All of them hydrate into a
//! [`DateTime<Utc>`] and project back in the classic layout, or in RFC 3339
//! when the time carries sub-second precision the classic layout cannot hold.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// `Wed Aug 27 13:08:45 +0000 2008`
pub const WIRE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse a wire timestamp in any accepted layout.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, WIRE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| parse_snapshot_key(raw))
        .map_err(|_| format!("unrecognised timestamp {:?}", raw))
}

/// Trend snapshot keys: `2011-10-06 19:36:17`, `2011-10-06 19:00` or
/// `2011-10-06`, all UTC.
fn parse_snapshot_key(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::default())))
        .map(|t| t.and_utc())
}

/// Format a timestamp in the classic wire layout; fractional times use
/// RFC 3339 with their sub-second digits so formatting never loses precision.
pub fn format(time: &DateTime<Utc>) -> String {
    if time.nanosecond() == 0 {
        time.format(WIRE_FORMAT).to_string()
    } else {
        time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Text(String),
    Epoch(i64),
}

/// `#[serde(with = "crate::timestamp::option")]` for `Option<DateTime<Utc>>`
/// fields. Pair it with `default` so a missing key stays `None`.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        time: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_str(&format(t)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        use serde::de::Error;

        match Option::<RawTime>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawTime::Text(s)) => parse(&s).map(Some).map_err(D::Error::custom),
            Some(RawTime::Epoch(secs)) => Utc
                .timestamp_opt(secs, 0)
                .single()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("timestamp {} out of range", secs))),
        }
    }
}
