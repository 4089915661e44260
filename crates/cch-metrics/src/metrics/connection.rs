//! Connection to CBCC services after referral (metrics 8 and 9).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use cch_common::whole_days_between;
use cch_model::{ClientId, Table};

use crate::diagnostics::MetricId;

use super::{ClientList, MetricContext};

/// Referral date per client; the last row for a client wins.
fn referral_dates(
    ids: &[Option<ClientId>],
    dates: &[Option<NaiveDateTime>],
) -> HashMap<ClientId, Option<NaiveDateTime>> {
    let mut map = HashMap::new();
    for (id, date) in ids.iter().zip(dates) {
        if let Some(id) = id {
            map.insert(id.clone(), *date);
        }
    }
    map
}

struct Window<'a> {
    newly_enrolled: &'a ClientList,
    referred: HashMap<ClientId, Option<NaiveDateTime>>,
    days: i64,
    require_non_negative_gap: bool,
}

impl Window<'_> {
    /// Whether a dated event for `id` lands within the window.
    fn admits(&self, id: Option<&ClientId>, at: Option<NaiveDateTime>) -> bool {
        let Some(id) = id.filter(|id| self.newly_enrolled.contains(id)) else {
            return false;
        };
        let (Some(Some(referred)), Some(at)) = (self.referred.get(id), at) else {
            return false;
        };
        let gap = whole_days_between(at, *referred);
        gap <= self.days && (!self.require_non_negative_gap || gap >= 0)
    }
}

/// Metrics 8 and 9: newly enrolled clients connected within `days` of referral.
///
/// A client connects through a services-provided interaction or through a
/// completed screening. Either source is skipped when its table lacks the
/// needed columns.
pub fn connected_within(
    client: &Table,
    interaction: &Table,
    screening: &Table,
    newly_enrolled: &ClientList,
    days: i64,
    metric: MetricId,
    ctx: &MetricContext<'_>,
) -> usize {
    if newly_enrolled.is_empty() {
        tracing::debug!(metric = %metric, "No newly enrolled clients");
        ctx.emit(metric, 0.0, 0);
        return 0;
    }

    let config = ctx.config;
    let (Some(client_ids), Some(referral)) = (
        client.client_ids(&config.client.client_id),
        client.timestamps(&config.client.referral_date),
    ) else {
        return ctx.missing(
            metric,
            client,
            &[&config.client.client_id, &config.client.referral_date],
        );
    };

    let window = Window {
        newly_enrolled,
        referred: referral_dates(&client_ids, &referral),
        days,
        require_non_negative_gap: config.require_non_negative_gap,
    };

    let mut connected: HashSet<ClientId> = HashSet::new();
    let mut considered = 0;

    let columns = &config.interaction;
    match (
        interaction.client_ids(&columns.client_id),
        interaction.texts(&columns.outcome),
        interaction.timestamps(&columns.create_stamp),
    ) {
        (Some(ids), Some(outcome), Some(created)) => {
            let services = &config.vocabulary.services_provided;
            for row in 0..interaction.height() {
                if !window.admits(ids[row].as_ref(), created[row]) {
                    continue;
                }
                considered += 1;
                let provided = outcome[row]
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|outcome| services.iter().any(|s| s == outcome));
                if let (true, Some(id)) = (provided, &ids[row]) {
                    connected.insert(id.clone());
                }
            }
        }
        _ => {
            if let Err(missing) = interaction.require(&[
                &columns.client_id,
                &columns.outcome,
                &columns.create_stamp,
            ]) {
                ctx.sink.on_missing_columns(metric, &missing);
            }
        }
    }

    let columns = &config.screening;
    match (
        screening.client_ids(&columns.client_id),
        screening.timestamps(&columns.assessment_date),
    ) {
        (Some(ids), Some(assessed)) => {
            for row in 0..screening.height() {
                if !window.admits(ids[row].as_ref(), assessed[row]) {
                    continue;
                }
                considered += 1;
                if let Some(id) = &ids[row] {
                    connected.insert(id.clone());
                }
            }
        }
        _ => {
            if let Err(missing) =
                screening.require(&[&columns.client_id, &columns.assessment_date])
            {
                ctx.sink.on_missing_columns(metric, &missing);
            }
        }
    }

    ctx.emit(metric, connected.len() as f64, considered);
    connected.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::metrics::fixtures::{context, table};
    use cch_model::{DateRange, MetricsConfig};

    fn newly(ids: &[&str]) -> ClientList {
        ids.iter().copied().map(ClientId::from).collect()
    }

    fn clients() -> Table {
        table(
            "Client",
            &["Client_Id", "ClientSystem_CcProgramReferralDate"],
            &[
                &["A", "2025-01-01 12:00"],
                &["B", "2025-01-01 12:00"],
                &["C", "2025-01-10"],
                &["C", "2025-01-01"],
                &["D", ""],
            ],
        )
    }

    fn interactions(rows: &[&[&str]]) -> Table {
        table(
            "Interaction",
            &[
                "Client_Id",
                "InteractionOption_ContactOutcome",
                "Interaction_CreateStamp",
            ],
            rows,
        )
    }

    fn no_screenings() -> Table {
        table(
            "Ahpscreening",
            &["Client_Id", "AhpscreeningSystem_DateAcceptedcompleted"],
            &[],
        )
    }

    fn run(config: &MetricsConfig, interaction: &Table, screening: &Table, days: i64) -> usize {
        let sink = RecordingSink::new();
        let ctx = context(config, DateRange::unbounded(), &sink);
        connected_within(
            &clients(),
            interaction,
            screening,
            &newly(&["A", "B", "C", "D"]),
            days,
            MetricId::ConnectedShortWindow,
            &ctx,
        )
    }

    #[test]
    fn seven_day_boundary_is_inclusive() {
        let config = MetricsConfig::default();
        let interaction = interactions(&[
            &["A", "Care Coordination", "2025-01-08 12:00"],
            &["B", "Care Coordination", "2025-01-09 12:00"],
        ]);

        assert_eq!(run(&config, &interaction, &no_screenings(), 7), 1);
        assert_eq!(run(&config, &interaction, &no_screenings(), 30), 2);
    }

    #[test]
    fn outcome_must_be_a_provided_service() {
        let config = MetricsConfig::default();
        let interaction = interactions(&[
            &["A", "Left voicemail", "2025-01-02"],
            &["B", " Referral to Services ", "2025-01-02"],
        ]);
        assert_eq!(run(&config, &interaction, &no_screenings(), 7), 1);
    }

    #[test]
    fn screening_branch_connects_without_interactions() {
        let config = MetricsConfig::default();
        let screening = table(
            "Ahpscreening",
            &["Client_Id", "AhpscreeningSystem_DateAcceptedcompleted"],
            &[&["A", "2025-01-05"], &["B", "2025-03-01"], &["D", "2025-01-02"]],
        );
        assert_eq!(run(&config, &interactions(&[]), &screening, 7), 1);
    }

    #[test]
    fn last_referral_row_per_client_wins() {
        let config = MetricsConfig::default();
        let interaction = interactions(&[&["C", "Care Coordination", "2025-01-15"]]);
        assert_eq!(run(&config, &interaction, &no_screenings(), 7), 0);
        assert_eq!(run(&config, &interaction, &no_screenings(), 14), 1);
    }

    #[test]
    fn negative_gap_follows_configuration() {
        let mut config = MetricsConfig::default();
        let interaction = interactions(&[&["A", "Education Provided", "2024-12-20"]]);
        assert_eq!(run(&config, &interaction, &no_screenings(), 7), 1);

        config.require_non_negative_gap = true;
        assert_eq!(run(&config, &interaction, &no_screenings(), 7), 0);
    }

    #[test]
    fn only_newly_enrolled_clients_count() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let interaction = interactions(&[&["A", "Care Coordination", "2025-01-02"]]);

        let count = connected_within(
            &clients(),
            &interaction,
            &no_screenings(),
            &newly(&["B"]),
            7,
            MetricId::ConnectedShortWindow,
            &ctx,
        );
        assert_eq!(count, 0);

        let empty = connected_within(
            &clients(),
            &interaction,
            &no_screenings(),
            &ClientList::new(),
            7,
            MetricId::ConnectedShortWindow,
            &ctx,
        );
        assert_eq!(empty, 0);
    }

    #[test]
    fn missing_interaction_columns_keep_screening_branch() {
        let config = MetricsConfig::default();
        let sink = RecordingSink::new();
        let ctx = context(&config, DateRange::unbounded(), &sink);
        let interaction = table("Interaction", &["Client_Id"], &[&["A"]]);
        let screening = table(
            "Ahpscreening",
            &["Client_Id", "AhpscreeningSystem_DateAcceptedcompleted"],
            &[&["B", "2025-01-03"]],
        );

        let count = connected_within(
            &clients(),
            &interaction,
            &screening,
            &newly(&["A", "B"]),
            7,
            MetricId::ConnectedShortWindow,
            &ctx,
        );
        assert_eq!(count, 1);
        assert_eq!(sink.missing()[0].1.table, "Interaction");
    }
}
