//! Percentages derived from earlier counts (metrics 10 to 14).

use cch_model::MetricValue;

use crate::diagnostics::MetricId;

use super::MetricContext;

/// `100 * part / whole`, or `0.0` when `whole` is zero.
pub fn percent_of(metric: MetricId, part: usize, whole: usize, ctx: &MetricContext<'_>) -> f64 {
    let value = MetricValue::percent_of(part, whole).as_f64();
    ctx.emit(metric, value, whole);
    value
}
