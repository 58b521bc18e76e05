//! Shared date helpers for card rendering.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse an ISO-8601 date or datetime string into a calendar date.
///
/// Accepts the forms the backend emits: a bare date (`2024-03-04`), an
/// RFC 3339 datetime with offset, or a naive datetime without one.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Short display form: "Mar 4, 2024".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Long display form: "Monday, March 4, 2024".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
