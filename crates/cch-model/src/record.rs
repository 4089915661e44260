use std::fmt;

use serde::Serialize;

use cch_common::format_numeric;

/// A metric's numeric result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    /// Percentage on a 0-100 scale.
    Percent(f64),
}

impl MetricValue {
    /// `100 * part / whole`, or `0.0` when `whole` is zero.
    pub fn percent_of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            Self::Percent(0.0)
        } else {
            Self::Percent(100.0 * part as f64 / whole as f64)
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Count(count) => count as f64,
            Self::Percent(percent) => percent,
        }
    }

    pub fn is_percent(self) -> bool {
        matches!(self, Self::Percent(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Percent(percent) => f.write_str(&format_numeric(*percent)),
        }
    }
}

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricRecord {
    #[serde(rename = "Metric")]
    pub name: String,
    pub value: MetricValue,
    pub description: String,
}

impl MetricRecord {
    pub fn new(name: impl Into<String>, value: MetricValue, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }
}
