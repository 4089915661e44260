//! Metrics engine for the care-coordination hub.
//!
//! [`compute_report`] runs sixteen aggregate computations over the six
//! export tables in dependency order and returns the ordered metric records.
//! Four of the metrics consume client lists produced by earlier ones:
//!
//! ```text
//! enrolled_clients (3) ──> priority_population (4), sdoh_assessed (5)
//! newly_enrolled (6)   ──> connected_within (8, 9)
//! discharged_clients   ──> wellbeing_improvement (16)
//! ```
//!
//! No error escapes the engine. A metric whose table lacks a required column
//! reports it through the [`DiagnosticSink`] and yields its zero value.

pub mod diagnostics;
pub mod metrics;
mod report;
mod select;
pub mod wellbeing;

pub use diagnostics::{DiagnosticSink, MetricEvent, MetricId, RecordingSink, TracingSink};
pub use metrics::{CategoryCounts, ClientList, MetricContext};
pub use report::{MetricsEngine, compute_report};
pub use wellbeing::{WellbeingCategory, categorize};
