use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CellValue;

/// Opaque client identifier shared across all tables.
///
/// Joins between tables use exact equality on the canonical string form, so
/// a numeric `1042` in one export and the text `"1042"` in another refer to
/// the same client. Text is kept as exported; `" 1042"` is a different id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reads an identifier from a cell; blank and whitespace-only cells carry
    /// no identifier.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        if !cell.is_non_blank() {
            return None;
        }
        cell.as_text().map(|text| Self(text.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
