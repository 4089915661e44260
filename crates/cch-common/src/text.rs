//! Free-text normalization helpers.
//!
//! Case-management exports mix numerals, list-like strings and labels in the
//! same column. These helpers give each metric a single, predictable way to
//! read such values.

use std::sync::LazyLock;

use regex::Regex;

static FIRST_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit-run regex"));

/// Returns the first maximal run of ASCII digits in `value` as an integer.
///
/// Surrounding punctuation is ignored, so list-like exports such as `["7"]`
/// and labelled answers such as `7 - Doing Well` both yield `7`.
///
/// # Examples
///
/// ```
/// use cch_common::extract_first_integer;
///
/// assert_eq!(extract_first_integer("[\"7\"]"), Some(7));
/// assert_eq!(extract_first_integer("10 - Best possible"), Some(10));
/// assert_eq!(extract_first_integer("n/a"), None);
/// ```
pub fn extract_first_integer(value: &str) -> Option<i64> {
    FIRST_DIGIT_RUN
        .find(value)
        .and_then(|found| found.as_str().parse::<i64>().ok())
}

/// True when the value is present and not empty after trimming.
pub fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}

/// Case-insensitive substring test. A missing haystack never matches.
pub fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    let Some(haystack) = haystack else {
        return false;
    };
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when the haystack contains any of the needles, ignoring case.
pub fn contains_any_ci<S: AsRef<str>>(haystack: Option<&str>, needles: &[S]) -> bool {
    let Some(haystack) = haystack else {
        return false;
    };
    let lowered = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| lowered.contains(&needle.as_ref().to_lowercase()))
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use cch_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(62.5), "62.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_integer_plain() {
        assert_eq!(extract_first_integer("7"), Some(7));
        assert_eq!(extract_first_integer("  42  "), Some(42));
    }

    #[test]
    fn test_extract_first_integer_list_like() {
        assert_eq!(extract_first_integer("['8']"), Some(8));
        assert_eq!(extract_first_integer("[\"3\"]"), Some(3));
        assert_eq!(extract_first_integer("[5, 9]"), Some(5));
    }

    #[test]
    fn test_extract_first_integer_float_text() {
        // A numeric cell rendered as "7.0" still reads as 7.
        assert_eq!(extract_first_integer("7.0"), Some(7));
    }

    #[test]
    fn test_extract_first_integer_none() {
        assert_eq!(extract_first_integer(""), None);
        assert_eq!(extract_first_integer("Declined to answer"), None);
    }

    #[test]
    fn test_non_blank() {
        assert!(!non_blank(None));
        assert!(!non_blank(Some("")));
        assert!(!non_blank(Some("   ")));
        assert!(non_blank(Some("Self")));
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci(Some("Discharged (AHP Only)"), "discharged"));
        assert!(contains_ci(Some("ENGAGED"), "Engaged"));
        assert!(!contains_ci(Some("Outreach"), "Engaged"));
        assert!(!contains_ci(None, "Engaged"));
    }

    #[test]
    fn test_contains_any_ci() {
        let statuses = ["Engaged", "Enrolled (Assigned)"];
        assert!(contains_any_ci(Some("enrolled (assigned)"), &statuses));
        assert!(!contains_any_ci(Some("Enrolled (Unassigned)"), &statuses));
        assert!(!contains_any_ci(None, &statuses));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.0), "0");
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn digits_survive_any_wrapping(n in 0i64..1_000_000, prefix in "[^0-9]{0,6}", suffix in "[^0-9]{0,6}") {
                let wrapped = format!("{prefix}{n}{suffix}");
                prop_assert_eq!(extract_first_integer(&wrapped), Some(n));
            }
        }
    }
}
