//! Tagged cell values.
//!
//! Export columns routinely mix text, numerals and blanks. Every cell is held
//! as one explicit variant and read through the coercions below; nothing
//! converts a cell implicitly.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use cch_common::{extract_first_integer, format_numeric, non_blank, parse_timestamp};

/// Display layout used when a timestamp cell is read as text.
const TIMESTAMP_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
}

impl CellValue {
    /// Builds a cell from raw export text. Empty strings become `Null`.
    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Null
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// String form of the cell; `None` for `Null`.
    ///
    /// Numbers render without trailing zeros and timestamps as
    /// `YYYY-MM-DD HH:MM:SS`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Null => None,
            Self::Text(value) => Some(Cow::Borrowed(value.as_str())),
            Self::Number(value) => Some(Cow::Owned(format_numeric(*value))),
            Self::Timestamp(value) => {
                Some(Cow::Owned(value.format(TIMESTAMP_TEXT_FORMAT).to_string()))
            }
        }
    }

    /// Parse-or-null timestamp coercion.
    ///
    /// Already-typed timestamps pass through unchanged, so repeated coercion
    /// is idempotent. Numbers never coerce to timestamps.
    pub fn to_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            Self::Text(value) => parse_timestamp(value),
            Self::Null | Self::Number(_) => None,
        }
    }

    /// First digit run in the cell's string form.
    ///
    /// Signs and fractions are not interpreted: `-3` reads as 3 and `7.5` as 7.
    pub fn to_first_integer(&self) -> Option<i64> {
        match self {
            Self::Number(value) if !value.is_finite() => None,
            _ => self.as_text().as_deref().and_then(extract_first_integer),
        }
    }

    /// True when the cell is present and its trimmed string form is non-empty.
    pub fn is_non_blank(&self) -> bool {
        non_blank(self.as_text().as_deref())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::from_text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
