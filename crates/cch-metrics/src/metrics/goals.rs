//! Identified needs met (metric 15).

use cch_common::contains_any_ci;
use cch_model::{MetricValue, Table};

use crate::diagnostics::MetricId;

use super::MetricContext;

/// Metric 15: share of goals created in range whose closure status reads as met.
///
/// Matching is a case-insensitive substring test, so `Not Met` also counts.
pub fn needs_met_percent(goal: &Table, ctx: &MetricContext<'_>) -> f64 {
    let metric = MetricId::NeedsMetPercent;
    let columns = &ctx.config.goal;

    let (Some(status), Some(created)) = (
        goal.texts(&columns.closure_status),
        goal.timestamps(&columns.created_date),
    ) else {
        return ctx.missing(
            metric,
            goal,
            &[&columns.closure_status, &columns.created_date],
        );
    };

    let statuses = &ctx.config.vocabulary.needs_met_statuses;
    let mut total = 0;
    let mut met = 0;
    for (status, created) in status.iter().zip(&created) {
        if !ctx.range.contains(*created) {
            continue;
        }
        total += 1;
        if contains_any_ci(status.as_deref(), statuses) {
            met += 1;
        }
    }

    let value = MetricValue::percent_of(met, total).as_f64();
    ctx.emit(metric, value, total);
    value
}
