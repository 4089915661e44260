//! Report output for the CCH metrics engine.
//!
//! Serializes the ordered metric list as a flat CSV table with the header
//! `Metric,Value,Description`. Counts print as integers and percentages
//! without trailing zeros.

mod error;
mod writer;

pub use error::{ReportError, Result};
pub use writer::{HEADER, render, write_report, write_to};
