//! Timestamp parsing for ordering failures.
//!
//! Timestamps travel through the system as the strings the warehouse export
//! produced. They are only parsed when two of them need to be compared.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried, in order, before falling back to RFC 3339 and bare dates.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a warehouse timestamp.
///
/// Returns `None` for empty or unrecognized input; callers treat that the
/// same as a missing timestamp.
///
/// # Examples
///
/// ```
/// use jiig::domain::time::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-02 03:04:05").is_some());
/// assert!(parse_timestamp("2024-01-02").is_some());
/// assert!(parse_timestamp("").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
