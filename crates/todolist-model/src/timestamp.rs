//! Timestamp text codec.
//!
//! Records keep their timestamps as text so that a single malformed value never
//! prevents a collection from loading. Values are written as
//! `YYYY-MM-DD HH:MM:SS` in local wall-clock time and parsed leniently.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};

/// Format used when writing timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-time layouts accepted on read, tried in order.
const ACCEPTED_LAYOUTS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a stored timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, ISO-8601 local date-times, RFC 3339 values with
/// a `Z` suffix or offset (the wall-clock part is kept and the offset dropped),
/// and bare `YYYY-MM-DD` dates (midnight). Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use todolist_model::timestamp::parse_timestamp;
///
/// assert!(parse_timestamp("2025-09-04 18:00:00").is_some());
/// assert!(parse_timestamp("2025-09-04T18:00:00Z").is_some());
/// assert!(parse_timestamp("yesterday-ish").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    let without_zulu = value.strip_suffix('Z').unwrap_or(value);
    for layout in ACCEPTED_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(without_zulu, layout) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(without_zulu, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a timestamp for storage.
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns the current local time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
