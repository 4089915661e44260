//! The metric functions.
//!
//! Each function reads one or more tables through typed column views and
//! returns its zero value when a required column is absent.

mod connection;
mod derived;
mod discharge;
mod enrollment;
mod goals;
mod outbound;
mod referrals;
mod screening;

use std::collections::HashSet;

use cch_model::{ClientId, DateRange, MetricsConfig, Table};

use crate::diagnostics::{DiagnosticSink, MetricEvent, MetricId};

pub use connection::connected_within;
pub use derived::percent_of;
pub use discharge::{discharged_clients, wellbeing_improvement};
pub use enrollment::{enrolled_clients, newly_enrolled};
pub use goals::needs_met_percent;
pub use outbound::outbound_referrals_by_category;
pub use referrals::{inbound_referrals, unique_individuals_referred};
pub use screening::{priority_population, sdoh_assessed};

/// Category name and count pairs, in first-seen order.
pub type CategoryCounts = Vec<(String, usize)>;

/// Shared inputs for one engine run.
#[derive(Clone, Copy)]
pub struct MetricContext<'a> {
    pub config: &'a MetricsConfig,
    pub range: DateRange,
    pub sink: &'a dyn DiagnosticSink,
}

impl<'a> MetricContext<'a> {
    pub fn new(config: &'a MetricsConfig, range: DateRange, sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            config,
            range,
            sink,
        }
    }

    pub(crate) fn emit(&self, metric: MetricId, value: f64, rows_considered: usize) {
        self.sink.on_metric(&MetricEvent {
            metric,
            value,
            rows_considered,
        });
    }

    /// Reports whichever of `columns` the table lacks and yields the zero value.
    pub(crate) fn missing<T: Default>(&self, metric: MetricId, table: &Table, columns: &[&str]) -> T {
        if let Err(missing) = table.require(columns) {
            self.sink.on_missing_columns(metric, &missing);
        }
        self.emit(metric, 0.0, 0);
        T::default()
    }
}

/// Ordered, de-duplicated client identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientList {
    ids: Vec<ClientId>,
    seen: HashSet<ClientId>,
}

impl ClientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an id unless already present. Returns whether it was added.
    pub fn push(&mut self, id: ClientId) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientId> {
        self.ids.iter()
    }
}

impl FromIterator<ClientId> for ClientList {
    fn from_iter<I: IntoIterator<Item = ClientId>>(iter: I) -> Self {
        let mut list = Self::new();
        for id in iter {
            list.push(id);
        }
        list
    }
}

impl<'a> IntoIterator for &'a ClientList {
    type Item = &'a ClientId;
    type IntoIter = std::slice::Iter<'a, ClientId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// True when the optional id is present and listed.
pub(crate) fn listed(clients: &ClientList, id: Option<&ClientId>) -> bool {
    id.is_some_and(|id| clients.contains(id))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use cch_model::{CellValue, DateRange, MetricsConfig, Table};

    use crate::diagnostics::RecordingSink;

    use super::MetricContext;

    /// Builds a table where every cell is text; `""` is a blank cell.
    pub fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_rows(
            name,
            columns,
            rows.iter()
                .map(|row| row.iter().map(|cell| CellValue::from(*cell)).collect()),
        )
    }

    pub fn range(start: &str, end: &str) -> DateRange {
        let parse = |value: &str| cch_common::parse_date_bound(value).unwrap();
        DateRange::from_dates(parse(start), parse(end))
    }

    pub fn context<'a>(
        config: &'a MetricsConfig,
        range: DateRange,
        sink: &'a RecordingSink,
    ) -> MetricContext<'a> {
        MetricContext::new(config, range, sink)
    }
}
