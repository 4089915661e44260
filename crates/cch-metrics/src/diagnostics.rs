//! Observability hook for the engine.
//!
//! The engine never prints. It reports each computed metric and every
//! missing-column fallback to an injected [`DiagnosticSink`].

use std::fmt;
use std::sync::{Mutex, PoisonError};

use cch_model::MissingColumns;

/// Identifies one computation in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    InboundReferrals,
    UniqueIndividualsReferred,
    EnrolledClients,
    PriorityPopulation,
    SdohAssessed,
    NewlyEnrolled,
    OutboundReferrals,
    ConnectedShortWindow,
    ConnectedLongWindow,
    EnrollmentPercent,
    PriorityPopulationPercent,
    SdohAssessmentPercent,
    ConnectedShortWindowPercent,
    ConnectedLongWindowPercent,
    NeedsMetPercent,
    DischargedClients,
    WellbeingImprovementPercent,
}

impl MetricId {
    pub const fn key(self) -> &'static str {
        match self {
            Self::InboundReferrals => "inbound_referrals",
            Self::UniqueIndividualsReferred => "unique_individuals_referred",
            Self::EnrolledClients => "enrolled_clients",
            Self::PriorityPopulation => "priority_population",
            Self::SdohAssessed => "sdoh_assessed",
            Self::NewlyEnrolled => "newly_enrolled",
            Self::OutboundReferrals => "outbound_referrals",
            Self::ConnectedShortWindow => "connected_short_window",
            Self::ConnectedLongWindow => "connected_long_window",
            Self::EnrollmentPercent => "enrollment_percent",
            Self::PriorityPopulationPercent => "priority_population_percent",
            Self::SdohAssessmentPercent => "sdoh_assessment_percent",
            Self::ConnectedShortWindowPercent => "connected_short_window_percent",
            Self::ConnectedLongWindowPercent => "connected_long_window_percent",
            Self::NeedsMetPercent => "needs_met_percent",
            Self::DischargedClients => "discharged_clients",
            Self::WellbeingImprovementPercent => "wellbeing_improvement_percent",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A computed metric as seen by the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricEvent {
    pub metric: MetricId,
    pub value: f64,
    /// Rows that passed the metric's filters before aggregation.
    pub rows_considered: usize,
}

/// Receives engine diagnostics.
pub trait DiagnosticSink {
    fn on_metric(&self, event: &MetricEvent);

    fn on_missing_columns(&self, metric: MetricId, missing: &MissingColumns);
}

/// Forwards diagnostics as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn on_metric(&self, event: &MetricEvent) {
        tracing::debug!(
            metric = %event.metric,
            value = event.value,
            rows = event.rows_considered,
            "Metric computed"
        );
    }

    fn on_missing_columns(&self, metric: MetricId, missing: &MissingColumns) {
        tracing::warn!(
            metric = %metric,
            table = %missing.table,
            columns = ?missing.columns,
            "Required columns missing, metric falls back to zero"
        );
    }
}

/// Captures diagnostics in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MetricEvent>>,
    missing: Mutex<Vec<(MetricId, MissingColumns)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MetricEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn missing(&self) -> Vec<(MetricId, MissingColumns)> {
        self.missing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Last recorded event for a metric.
    pub fn event(&self, metric: MetricId) -> Option<MetricEvent> {
        self.events().into_iter().rev().find(|e| e.metric == metric)
    }
}

impl DiagnosticSink for RecordingSink {
    fn on_metric(&self, event: &MetricEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*event);
    }

    fn on_missing_columns(&self, metric: MetricId, missing: &MissingColumns) {
        self.missing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((metric, missing.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order_and_latest() {
        let sink = RecordingSink::new();
        for value in [1.0, 2.0] {
            sink.on_metric(&MetricEvent {
                metric: MetricId::InboundReferrals,
                value,
                rows_considered: 3,
            });
        }
        sink.on_missing_columns(
            MetricId::NeedsMetPercent,
            &MissingColumns {
                table: "Goalshortterm".to_string(),
                columns: vec!["GoalshorttermSystem_StgDateCreated".to_string()],
            },
        );

        assert_eq!(sink.events().len(), 2);
        assert_eq!(
            sink.event(MetricId::InboundReferrals).map(|e| e.value),
            Some(2.0)
        );
        assert_eq!(sink.missing()[0].0, MetricId::NeedsMetPercent);
        assert!(sink.event(MetricId::NewlyEnrolled).is_none());
    }
}
