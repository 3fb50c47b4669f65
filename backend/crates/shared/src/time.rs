//! Client timestamp parsing
//!
//! Clients send instants in several shapes; all are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (taken as UTC), or a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}
