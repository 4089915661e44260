//! Enrollment status (metrics 3 and 6).

use cch_common::contains_any_ci;
use cch_model::Table;

use crate::diagnostics::MetricId;
use crate::select::{Pick, pick_per_client};

use super::{ClientList, MetricContext};

/// Metric 3: clients whose earliest status row marks them enrolled.
///
/// Rows created after the range end are ignored when the create column
/// exists.
pub fn enrolled_clients(client: &Table, ctx: &MetricContext<'_>) -> ClientList {
    let metric = MetricId::EnrolledClients;
    let columns = &ctx.config.client;

    let (Some(ids), Some(status), Some(edited)) = (
        client.client_ids(&columns.client_id),
        client.texts(&columns.care_connect_status),
        client.timestamps(&columns.edit_stamp),
    ) else {
        return ctx.missing(
            metric,
            client,
            &[
                &columns.client_id,
                &columns.care_connect_status,
                &columns.edit_stamp,
            ],
        );
    };

    let candidates: Vec<usize> = match client.timestamps(&columns.create_stamp) {
        Some(created) => (0..client.height())
            .filter(|&row| ctx.range.not_after_end(created[row]))
            .collect(),
        None => (0..client.height()).collect(),
    };

    let statuses = &ctx.config.vocabulary.enrolled_statuses;
    let enrolled: ClientList = pick_per_client(&ids, &edited, candidates.iter().copied(), Pick::Earliest)
        .into_iter()
        .filter(|(_, row)| contains_any_ci(status[*row].as_deref(), statuses))
        .map(|(id, _)| id)
        .collect();

    ctx.emit(metric, enrolled.len() as f64, candidates.len());
    enrolled
}

/// Metric 6: clients opted in during the range whose latest status row marks
/// them enrolled.
pub fn newly_enrolled(client: &Table, ctx: &MetricContext<'_>) -> ClientList {
    let metric = MetricId::NewlyEnrolled;
    let columns = &ctx.config.client;

    let (Some(ids), Some(status), Some(edited), Some(opted_in)) = (
        client.client_ids(&columns.client_id),
        client.texts(&columns.care_connect_status),
        client.timestamps(&columns.edit_stamp),
        client.timestamps(&columns.opt_in_date),
    ) else {
        return ctx.missing(
            metric,
            client,
            &[
                &columns.client_id,
                &columns.care_connect_status,
                &columns.edit_stamp,
                &columns.opt_in_date,
            ],
        );
    };

    let candidates: Vec<usize> = (0..client.height())
        .filter(|&row| ctx.range.contains(opted_in[row]))
        .collect();

    let statuses = &ctx.config.vocabulary.newly_enrolled_statuses;
    let enrolled: ClientList = pick_per_client(&ids, &edited, candidates.iter().copied(), Pick::Latest)
        .into_iter()
        .filter(|(_, row)| {
            contains_any_ci(status[*row].as_deref(), statuses) && ctx.range.contains(opted_in[*row])
        })
        .map(|(id, _)| id)
        .collect();

    ctx.emit(metric, enrolled.len() as f64, candidates.len());
    enrolled
}
