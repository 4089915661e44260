use std::path::PathBuf;

use cch_model::{DateRange, MetricRecord, TableName};

/// Loaded table with its row count.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub name: TableName,
    pub rows: usize,
}

/// Everything the console summary shows after a report run.
#[derive(Debug)]
pub struct ReportOutcome {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub range: DateRange,
    pub tables: Vec<TableSummary>,
    pub missing_tables: Vec<TableName>,
    pub records: Vec<MetricRecord>,
}
