//! CLI library components for the CCH metrics report.

pub mod dates;
pub mod logging;
