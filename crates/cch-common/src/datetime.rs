//! Parse-or-null timestamp handling.
//!
//! Export columns carry dates in several textual layouts (ISO with or without
//! a time part, US month/day/year, RFC 3339). Anything that does not match a
//! known layout becomes `None` instead of an error, so a bad value simply
//! falls out of every date filter and day-difference comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time layouts tried in order. `%.f` also accepts a missing fraction.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const SECONDS_PER_DAY: i64 = 86_400;

/// Parses a textual timestamp, returning `None` when no known layout matches.
///
/// # Examples
///
/// ```
/// use cch_common::parse_timestamp;
///
/// assert!(parse_timestamp("2025-03-14 09:30:00").is_some());
/// assert!(parse_timestamp("03/14/2025").is_some());
/// assert!(parse_timestamp("not a date").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Parses a user-supplied range bound in strict `YYYY-MM-DD` form.
pub fn parse_date_bound(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Whole days elapsed from `earlier` to `later`, rounded toward negative infinity.
///
/// A gap of 7 days and 5 hours counts as 7; a gap of minus 5 hours counts as -1.
pub fn whole_days_between(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
    (later - earlier).num_seconds().div_euclid(SECONDS_PER_DAY)
}
