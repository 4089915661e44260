//! Inbound referral counts (metrics 1 and 2).

use std::collections::HashSet;

use cch_common::non_blank;
use cch_model::{ClientId, Table};

use crate::diagnostics::MetricId;

use super::MetricContext;

/// Rows kept by the optional create-stamp range filter.
///
/// The filter applies only when the create column exists.
fn rows_in_range(table: &Table, ctx: &MetricContext<'_>) -> Vec<usize> {
    match table.timestamps(&ctx.config.client.create_stamp) {
        Some(created) => (0..table.height())
            .filter(|&row| ctx.range.contains(created[row]))
            .collect(),
        None => (0..table.height()).collect(),
    }
}

/// Metric 1: rows with a non-blank referral type.
pub fn inbound_referrals(client: &Table, ctx: &MetricContext<'_>) -> usize {
    let metric = MetricId::InboundReferrals;
    let columns = &ctx.config.client;

    let Some(referral_type) = client.texts(&columns.referral_type) else {
        return ctx.missing(metric, client, &[&columns.referral_type]);
    };

    let rows = rows_in_range(client, ctx);
    let count = rows
        .iter()
        .filter(|&&row| non_blank(referral_type[row].as_deref()))
        .count();

    ctx.emit(metric, count as f64, rows.len());
    count
}

/// Metric 2: distinct clients among referral rows with a valid, non-duplicate status.
pub fn unique_individuals_referred(client: &Table, ctx: &MetricContext<'_>) -> usize {
    let metric = MetricId::UniqueIndividualsReferred;
    let columns = &ctx.config.client;
    let sentinel = ctx.config.vocabulary.duplicate_sentinel.as_str();

    let (Some(ids), Some(referral_type), Some(status)) = (
        client.client_ids(&columns.client_id),
        client.texts(&columns.referral_type),
        client.texts(&columns.ahp_status),
    ) else {
        return ctx.missing(
            metric,
            client,
            &[&columns.client_id, &columns.referral_type, &columns.ahp_status],
        );
    };

    let rows = rows_in_range(client, ctx);
    let unique: HashSet<&ClientId> = rows
        .iter()
        .filter(|&&row| non_blank(referral_type[row].as_deref()))
        .filter(|&&row| {
            status[row]
                .as_deref()
                .map(str::trim)
                .is_some_and(|status| !status.is_empty() && status != sentinel)
        })
        .filter_map(|&row| ids[row].as_ref())
        .collect();

    ctx.emit(metric, unique.len() as f64, rows.len());
    unique.len()
}
