//! Shared utilities for CCH metrics crates.
//!
//! This crate provides the normalization helpers every metric relies on:
//! free-text coercions (first-integer extraction, blank checks,
//! case-insensitive matching) and parse-or-null timestamp handling.

pub mod datetime;
pub mod text;

// Re-export commonly used functions at crate root for convenience
pub use datetime::{parse_date_bound, parse_timestamp, whole_days_between};
pub use text::{contains_any_ci, contains_ci, extract_first_integer, format_numeric, non_blank};
