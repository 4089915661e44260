//! Reporting-period arguments.

use anyhow::{Result, bail};
use chrono::NaiveDate;

use cch_common::parse_date_bound;
use cch_model::DateRange;

/// Clap value parser for `YYYY-MM-DD` bounds.
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_bound(value).ok_or_else(|| format!("expected a date as YYYY-MM-DD, got '{value}'"))
}

/// Builds the reporting range from optional CLI bounds.
///
/// Both bounds present gives a closed range from midnight of `start` to
/// midnight of `end`. If either is absent the range is unbounded.
///
/// # Errors
///
/// Returns an error when `start` falls after `end`.
pub fn reporting_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<DateRange> {
    match (start, end) {
        (Some(start), Some(end)) => {
            if start > end {
                bail!("start date {start} is after end date {end}");
            }
            Ok(DateRange::from_dates(start, end))
        }
        (None, None) => Ok(DateRange::unbounded()),
        (start, end) => {
            tracing::warn!(
                start = ?start,
                end = ?end,
                "Only one date bound given; reporting over all dates"
            );
            Ok(DateRange::unbounded())
        }
    }
}

/// Human-readable form of a range for the console summary.
pub fn describe_range(range: &DateRange) -> String {
    if range.is_unbounded() {
        "all dates".to_string()
    } else {
        format!("{} to {}", range.start.date(), range.end.date())
    }
}
