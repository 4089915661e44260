//! Outbound referrals by HRSN category (metric 7).

use cch_model::Table;

use crate::diagnostics::MetricId;

use super::{CategoryCounts, MetricContext};

/// Metric 7: in-range referral rows with a client id, grouped by taxonomy.
///
/// Blank taxonomy names count under the configured uncategorized label.
pub fn outbound_referrals_by_category(referral: &Table, ctx: &MetricContext<'_>) -> CategoryCounts {
    let metric = MetricId::OutboundReferrals;
    let columns = &ctx.config.referral;

    let (Some(ids), Some(taxonomy), Some(requested)) = (
        referral.client_ids(&columns.client_id),
        referral.texts(&columns.taxonomy_name),
        referral.timestamps(&columns.requested_date),
    ) else {
        return ctx.missing(
            metric,
            referral,
            &[
                &columns.client_id,
                &columns.taxonomy_name,
                &columns.requested_date,
            ],
        );
    };

    let uncategorized = ctx.config.vocabulary.uncategorized_label.as_str();
    let mut counts: CategoryCounts = Vec::new();
    let mut total = 0;

    for row in 0..referral.height() {
        if !ctx.range.contains(requested[row]) || ids[row].is_none() {
            continue;
        }
        total += 1;

        let category = taxonomy[row]
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(uncategorized);

        match counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category.to_string(), 1)),
        }
    }

    ctx.emit(metric, total as f64, total);
    counts
}
