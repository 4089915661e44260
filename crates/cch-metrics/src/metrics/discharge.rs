//! Discharged clients and wellbeing improvement (metric 16).

use cch_common::contains_ci;
use cch_model::{MetricValue, Table};

use crate::diagnostics::MetricId;
use crate::select::{Pick, pick_per_client};
use crate::wellbeing::categorize;

use super::{ClientList, MetricContext, listed};

/// Clients with a discharge outcome recorded during the range.
pub fn discharged_clients(interaction: &Table, ctx: &MetricContext<'_>) -> ClientList {
    let metric = MetricId::DischargedClients;
    let columns = &ctx.config.interaction;

    let (Some(ids), Some(outcome), Some(created)) = (
        interaction.client_ids(&columns.client_id),
        interaction.texts(&columns.outcome),
        interaction.timestamps(&columns.create_stamp),
    ) else {
        return ctx.missing(
            metric,
            interaction,
            &[
                &columns.client_id,
                &columns.outcome,
                &columns.create_stamp,
            ],
        );
    };

    let keyword = ctx.config.vocabulary.discharged_keyword.as_str();
    let discharged: ClientList = (0..interaction.height())
        .filter(|&row| contains_ci(outcome[row].as_deref(), keyword))
        .filter(|&row| ctx.range.contains(created[row]))
        .filter_map(|row| ids[row].clone())
        .collect();

    ctx.emit(metric, discharged.len() as f64, discharged.len());
    discharged
}

/// Metric 16: share of discharged clients whose wellbeing category rose
/// between their first and last scored screening.
///
/// The intake row is the earliest dated screening. The exit row is the last one
/// in ascending timestamp order with undated rows placed at the end, so an
/// undated screening is read as the discharge screening.
///
/// Clients with an unknown category at either end are left out of both
/// numerator and denominator.
pub fn wellbeing_improvement(screening: &Table, discharged: &ClientList, ctx: &MetricContext<'_>) -> f64 {
    let metric = MetricId::WellbeingImprovementPercent;
    if discharged.is_empty() {
        tracing::debug!(metric = %metric, "No discharged clients");
        ctx.emit(metric, 0.0, 0);
        return 0.0;
    }

    let columns = &ctx.config.screening;
    let (Some(ids), Some(created), Some(first), Some(second)) = (
        screening.client_ids(&columns.client_id),
        screening.timestamps(&columns.create_stamp),
        screening.column(&columns.ladder_first),
        screening.column(&columns.ladder_second),
    ) else {
        return ctx.missing(
            metric,
            screening,
            &[
                &columns.client_id,
                &columns.create_stamp,
                &columns.ladder_first,
                &columns.ladder_second,
            ],
        );
    };
    let first: Vec<_> = first.collect();
    let second: Vec<_> = second.collect();

    let candidates: Vec<usize> = (0..screening.height())
        .filter(|&row| listed(discharged, ids[row].as_ref()))
        .filter(|&row| first[row].is_non_blank() && second[row].is_non_blank())
        .collect();

    let category =
        |row: usize| categorize(first[row].to_first_integer(), second[row].to_first_integer());

    let intake = pick_per_client(&ids, &created, candidates.iter().copied(), Pick::Earliest);
    let exit = pick_per_client(&ids, &created, candidates.iter().copied(), Pick::Final);

    let mut improved = 0;
    let mut assessed = 0;
    for ((_, intake_row), (_, exit_row)) in intake.iter().zip(&exit) {
        let Some(better) = category(*exit_row).improved_from(category(*intake_row)) else {
            continue;
        };
        assessed += 1;
        if better {
            improved += 1;
        }
    }

    let value = MetricValue::percent_of(improved, assessed).as_f64();
    ctx.emit(metric, value, candidates.len());
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::metrics::fixtures::{context, range, table};
    use cch_model::{ClientId, DateRange, MetricsConfig};

    const SCREENING: &[&str] = &[
        "Client_Id",
        "Ahpscreening_CreateStamp",
        "AhpscreeningOption_WellbeingCantrilsLadder1",
        "AhpscreeningOption_WellbeingCantrilsLadder2",
    ];

    fn discharged(ids: &[&str]) -> ClientList {
        ids.iter().copied().map(ClientId::from).collect()
    }

    #[test]
    fn discharged_clients_in_range() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, range("2025-01-01", "2025-01-31"), &sink);
        let interaction = table(
            "Interaction",
            &[
                "Client_Id",
                "InteractionOption_ContactOutcome",
                "Interaction_CreateStamp",
            ],
            &[
                &["A", "Discharged - goals met", "2025-01-10"],
                &["A", "DISCHARGED", "2025-01-12"],
                &["B", "Care Coordination", "2025-01-10"],
                &["C", "Discharged", "2025-02-10"],
                &["", "Discharged", "2025-01-10"],
                &["D", "Client discharged", "2025-01-31"],
            ],
        );

        let ids: Vec<String> = discharged_clients(&interaction, &ctx)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["A", "D"]);
    }

    #[test]
    fn improvement_over_known_categories_only() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let screening = table(
            "Ahpscreening",
            SCREENING,
            &[
                // A: Suffering -> Thriving, improved.
                &["A", "2025-03-01", "8", "9"],
                &["A", "2025-01-01", "2", "3"],
                // B: Thriving -> Struggling, not improved.
                &["B", "2025-01-01", "9", "9"],
                &["B", "2025-02-01", "5", "6"],
                // C: unscoreable text at intake, excluded.
                &["C", "2025-01-01", "n/a", "unknown"],
                &["C", "2025-02-01", "8", "8"],
                // D: single screening counts, not improved.
                &["D", "2025-01-01", "5", "5"],
                // E: not discharged.
                &["E", "2025-01-01", "1", "1"],
                &["E", "2025-02-01", "9", "9"],
            ],
        );

        let percent = wellbeing_improvement(&screening, &discharged(&["A", "B", "C", "D"]), &ctx);
        assert!((percent - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn blank_scores_are_dropped_before_selection() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let screening = table(
            "Ahpscreening",
            SCREENING,
            &[
                &["A", "2025-01-01", "", "2"],
                &["A", "2025-02-01", "3", "3"],
                &["A", "2025-03-01", "7", "8"],
            ],
        );
        assert_eq!(wellbeing_improvement(&screening, &discharged(&["A"]), &ctx), 100.0);
    }

    #[test]
    fn undated_screening_is_the_discharge_row() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let screening = table(
            "Ahpscreening",
            SCREENING,
            &[
                &["A", "2025-01-01", "2", "2"],
                &["A", "", "9", "9"],
                &["A", "2025-02-01", "2", "2"],
            ],
        );
        assert_eq!(wellbeing_improvement(&screening, &discharged(&["A"]), &ctx), 100.0);
    }

    #[test]
    fn empty_discharge_list_is_zero() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let screening = table("Ahpscreening", SCREENING, &[&["A", "2025-01-01", "1", "1"]]);
        assert_eq!(wellbeing_improvement(&screening, &ClientList::new(), &ctx), 0.0);
        assert!(sink.missing().is_empty());
    }

    #[test]
    fn missing_columns_are_zero() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let screening = table("Ahpscreening", &["Client_Id"], &[&["A"]]);
        let interaction = table("Interaction", &["Client_Id"], &[&["A"]]);

        assert_eq!(wellbeing_improvement(&screening, &discharged(&["A"]), &ctx), 0.0);
        assert!(discharged_clients(&interaction, &ctx).is_empty());
        assert_eq!(sink.missing().len(), 2);
    }
}
