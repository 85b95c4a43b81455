//! Timestamp normalization.
//!
//! Upstream timestamps arrive as RFC 3339 strings, zone-less ISO-8601
//! strings, epoch seconds, or `{seconds, nanos}` objects depending on the
//! API revision. All of them are rendered as UTC RFC 3339 with a `Z` suffix
//! and only as many fractional digits as needed to keep full precision.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Parse an ISO-8601 timestamp; zone-less values are taken as UTC.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a timestamp in the canonical form.
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Normalize a timestamp-bearing JSON value.
///
/// Values that do not look like a timestamp are returned unchanged.
pub fn normalize(value: &Value) -> Value {
    let parsed = match value {
        Value::String(s) => parse(s),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        Value::Object(map) => {
            let secs = map.get("seconds").and_then(as_i64);
            let nanos = map.get("nanos").and_then(as_i64).unwrap_or(0);
            secs.and_then(|secs| DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?))
        }
        _ => None,
    };

    match parsed {
        Some(dt) => Value::String(format(&dt)),
        None => value.clone(),
    }
}

/// Protobuf JSON encodes int64 as strings.
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
