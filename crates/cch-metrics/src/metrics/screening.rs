//! Screening metrics over enrolled clients (metrics 4 and 5).

use std::collections::HashSet;

use cch_model::{ClientId, Table};

use crate::diagnostics::MetricId;
use crate::select::{Pick, pick_per_client};
use crate::wellbeing::{WellbeingCategory, categorize};

use super::{ClientList, MetricContext, listed};

/// Metric 4: enrolled clients whose first scored screening is Suffering or
/// Struggling.
pub fn priority_population(screening: &Table, enrolled: &ClientList, ctx: &MetricContext<'_>) -> usize {
    let metric = MetricId::PriorityPopulation;
    let columns = &ctx.config.screening;

    let (Some(ids), Some(edited), Some(first), Some(second)) = (
        screening.client_ids(&columns.client_id),
        screening.timestamps(&columns.edit_stamp),
        screening.column(&columns.ladder_first),
        screening.column(&columns.ladder_second),
    ) else {
        return ctx.missing(
            metric,
            screening,
            &[
                &columns.client_id,
                &columns.edit_stamp,
                &columns.ladder_first,
                &columns.ladder_second,
            ],
        );
    };
    let first: Vec<_> = first.collect();
    let second: Vec<_> = second.collect();

    let candidates: Vec<usize> = (0..screening.height())
        .filter(|&row| listed(enrolled, ids[row].as_ref()))
        .filter(|&row| first[row].is_non_blank() && second[row].is_non_blank())
        .collect();

    let count = pick_per_client(&ids, &edited, candidates.iter().copied(), Pick::Earliest)
        .into_iter()
        .filter(|(_, row)| {
            matches!(
                categorize(first[*row].to_first_integer(), second[*row].to_first_integer()),
                WellbeingCategory::Suffering | WellbeingCategory::Struggling
            )
        })
        .count();

    ctx.emit(metric, count as f64, candidates.len());
    count
}

/// Metric 5: enrolled clients with at least one parseable assessment date.
pub fn sdoh_assessed(screening: &Table, enrolled: &ClientList, ctx: &MetricContext<'_>) -> usize {
    let metric = MetricId::SdohAssessed;
    let columns = &ctx.config.screening;

    let (Some(ids), Some(assessed)) = (
        screening.client_ids(&columns.client_id),
        screening.timestamps(&columns.assessment_date),
    ) else {
        return ctx.missing(
            metric,
            screening,
            &[&columns.client_id, &columns.assessment_date],
        );
    };

    let mut considered = 0;
    let mut clients: HashSet<&ClientId> = HashSet::new();
    for (id, date) in ids.iter().zip(&assessed) {
        let Some(id) = id.as_ref().filter(|id| enrolled.contains(id)) else {
            continue;
        };
        considered += 1;
        if date.is_some() {
            clients.insert(id);
        }
    }

    ctx.emit(metric, clients.len() as f64, considered);
    clients.len()
}
