//! Report assembly.

use cch_model::{DateRange, MetricRecord, MetricValue, MetricsConfig, TableName, Tables};

use crate::diagnostics::{DiagnosticSink, MetricId, TracingSink};
use crate::metrics::{
    MetricContext, connected_within, discharged_clients, enrolled_clients, inbound_referrals,
    needs_met_percent, newly_enrolled, outbound_referrals_by_category, percent_of,
    priority_population, sdoh_assessed, unique_individuals_referred, wellbeing_improvement,
};

static TRACING_SINK: TracingSink = TracingSink;

/// Runs the metric pipeline with a fixed configuration and sink.
pub struct MetricsEngine<'a> {
    config: &'a MetricsConfig,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> MetricsEngine<'a> {
    /// An engine reporting diagnostics through `tracing`.
    pub fn new(config: &'a MetricsConfig) -> Self {
        Self {
            config,
            sink: &TRACING_SINK,
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = sink;
        self
    }

    /// Computes every metric in display order.
    pub fn compute_report(&self, tables: &Tables, range: DateRange) -> Vec<MetricRecord> {
        let span = tracing::info_span!("compute_report", unbounded = range.is_unbounded());
        let _guard = span.enter();

        let ctx = MetricContext::new(self.config, range, self.sink);
        let client = tables.get(TableName::Client);
        let screening = tables.get(TableName::Ahpscreening);
        let interaction = tables.get(TableName::Interaction);
        let windows = self.config.windows;

        let inbound = inbound_referrals(client, &ctx);
        let referred = unique_individuals_referred(client, &ctx);
        let enrolled = enrolled_clients(client, &ctx);
        let priority = priority_population(screening, &enrolled, &ctx);
        let assessed = sdoh_assessed(screening, &enrolled, &ctx);
        let newly = newly_enrolled(client, &ctx);
        let outbound =
            outbound_referrals_by_category(tables.get(TableName::InteractionReferral), &ctx);
        let connected_short = connected_within(
            client,
            interaction,
            screening,
            &newly,
            windows.short_days,
            MetricId::ConnectedShortWindow,
            &ctx,
        );
        let connected_long = connected_within(
            client,
            interaction,
            screening,
            &newly,
            windows.long_days,
            MetricId::ConnectedLongWindow,
            &ctx,
        );

        let mut records = vec![
            count(
                "Number of Inbound Referrals into the CCH",
                inbound,
                "Unique inbound referrals into the CCH.",
            ),
            count(
                "Number of unique Individuals Referred into the CCH",
                referred,
                "Unique individuals referred into the CCH.",
            ),
            count(
                "Number of Enrolled Clients",
                enrolled.len(),
                "Unique clients enrolled in the CCH.",
            ),
            count(
                "Number of Enrolled Clients from Priority Population",
                priority,
                "Enrolled clients from priority populations based on Cantrils Ladder scores.",
            ),
            count(
                "Number of Enrolled Clients with an SDOH assessment",
                assessed,
                "Enrolled clients who have completed an SDOH assessment.",
            ),
            count(
                "Number of Newly Enrolled Clients",
                newly.len(),
                "Unique clients newly enrolled in the CCH during the reporting period.",
            ),
        ];

        for (category, total) in &outbound {
            records.push(count(
                format!("Number of Outbound Referrals to HRSN Services: {category}"),
                *total,
                format!(
                    "Total outbound referrals made from the CCH to HRSN services in category: {category}."
                ),
            ));
        }

        records.push(count(
            format!(
                "Number of newly enrolled clients connected to CBCC services within {} days of referral",
                windows.short_days
            ),
            connected_short,
            format!(
                "Clients who were newly enrolled in the CCH and connected to CBCC services within {} days of referral.",
                windows.short_days
            ),
        ));
        records.push(count(
            format!(
                "Number of newly enrolled clients connected to CBCC services within {} days of referral",
                windows.long_days
            ),
            connected_long,
            format!(
                "Clients who were newly enrolled in the CCH and connected to CBCC services within {} days of referral.",
                windows.long_days
            ),
        ));

        records.push(percent(
            "Percent of individuals referred to the CCH who are enrolled in the CCH.",
            percent_of(MetricId::EnrollmentPercent, enrolled.len(), referred, &ctx),
            "Percentage of individuals referred to the CCH who are enrolled in the CCH.",
        ));
        records.push(percent(
            "Percent of enrolled clients from priority populations.",
            percent_of(
                MetricId::PriorityPopulationPercent,
                priority,
                enrolled.len(),
                &ctx,
            ),
            "Percentage of enrolled clients who are from priority populations.",
        ));
        records.push(percent(
            "Percent of enrolled clients with an SDOH assessment.",
            percent_of(
                MetricId::SdohAssessmentPercent,
                assessed,
                enrolled.len(),
                &ctx,
            ),
            "Enrolled clients who have completed an SDOH assessment.",
        ));
        records.push(percent(
            format!(
                "Percent of newly enrolled clients connected to CBCC services within {} days of referral.",
                windows.short_days
            ),
            percent_of(
                MetricId::ConnectedShortWindowPercent,
                connected_short,
                newly.len(),
                &ctx,
            ),
            format!(
                "Percentage of newly enrolled clients connected to CBCC services within {} days of referral.",
                windows.short_days
            ),
        ));
        records.push(percent(
            format!(
                "Percent of newly enrolled clients connected to CBCC services within {} days of referral.",
                windows.long_days
            ),
            percent_of(
                MetricId::ConnectedLongWindowPercent,
                connected_long,
                newly.len(),
                &ctx,
            ),
            format!(
                "Percentage of newly enrolled clients connected to CBCC services within {} days of referral.",
                windows.long_days
            ),
        ));
        records.push(percent(
            "Percent of identified client needs that were successfully met.",
            needs_met_percent(tables.get(TableName::Goalshortterm), &ctx),
            "Percentage of identified client needs that were successfully met during the reporting period.",
        ));

        let discharged = discharged_clients(interaction, &ctx);
        records.push(percent(
            "Percent of Discharged Clients Reporting Improved Wellbeing",
            wellbeing_improvement(screening, &discharged, &ctx),
            "Percentage of discharged clients who reported improved wellbeing based on Cantrils Ladder scores.",
        ));

        tracing::info!(records = records.len(), "Report assembled");
        records
    }
}

/// Computes the report with diagnostics sent to `tracing`.
pub fn compute_report(tables: &Tables, range: DateRange, config: &MetricsConfig) -> Vec<MetricRecord> {
    MetricsEngine::new(config).compute_report(tables, range)
}

fn count(name: impl Into<String>, value: usize, description: impl Into<String>) -> MetricRecord {
    MetricRecord::new(name, MetricValue::Count(value), description)
}

fn percent(name: impl Into<String>, value: f64, description: impl Into<String>) -> MetricRecord {
    MetricRecord::new(name, MetricValue::Percent(value), description)
}
