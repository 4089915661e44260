use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use cch_cli::dates::reporting_range;
use cch_ingest::load_tables;
use cch_metrics::MetricsEngine;
use cch_model::{MetricsConfig, TableName, Tables};
use cch_report::write_report;

use crate::cli::{ConfigArgs, ReportArgs, TablesArgs};
use crate::summary::apply_table_style;
use crate::types::{ReportOutcome, TableSummary};

/// Report file name used when `--output` is not given.
const DEFAULT_REPORT_NAME: &str = "cch_metrics.csv";

/// Loads the TOML override file, or the built-in defaults.
fn load_config(path: Option<&Path>) -> Result<MetricsConfig> {
    match path {
        Some(path) => {
            let config = MetricsConfig::load(path)
                .with_context(|| format!("load config {}", path.display()))?;
            info!(path = %path.display(), "Loaded configuration");
            Ok(config)
        }
        None => Ok(MetricsConfig::default()),
    }
}

pub fn run_report(args: &ReportArgs) -> Result<ReportOutcome> {
    let span = info_span!("report", input = %args.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let range = reporting_range(args.start, args.end)?;
    let config = load_config(args.config.as_deref())?;

    let tables = load_tables(&args.input)
        .with_context(|| format!("load exports from {}", args.input.display()))?;
    info!(
        tables = tables.loaded().count(),
        rows = tables.total_rows(),
        "Exports loaded"
    );

    let records = MetricsEngine::new(&config).compute_report(&tables, range);

    let output = if args.dry_run {
        info!("Dry run; report not written");
        None
    } else {
        let path = output_path(args);
        write_report(&path, &records).with_context(|| format!("write {}", path.display()))?;
        Some(path)
    };

    info!(
        records = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Report complete"
    );

    Ok(ReportOutcome {
        input: args.input.clone(),
        output,
        range,
        tables: table_summaries(&tables),
        missing_tables: TableName::ALL
            .into_iter()
            .filter(|name| !tables.is_loaded(*name))
            .collect(),
        records,
    })
}

fn table_summaries(tables: &Tables) -> Vec<TableSummary> {
    tables
        .loaded()
        .map(|name| TableSummary {
            name,
            rows: tables.get(name).height(),
        })
        .collect()
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let tables = match &args.input {
        Some(input) => Some(
            load_tables(input)
                .with_context(|| format!("load exports from {}", input.display()))?,
        ),
        None => None,
    };

    let mut table = Table::new();
    let mut header = vec!["Table", "Bound columns"];
    if tables.is_some() {
        header.extend(["Rows", "Missing columns"]);
    }
    table.set_header(header);
    apply_table_style(&mut table);

    for name in TableName::ALL {
        let bound = config.bound_columns(name);
        let mut row = vec![name.to_string(), list_or_dash(&bound)];
        if let Some(tables) = &tables {
            let loaded = tables.get(name);
            if tables.is_loaded(name) {
                let missing: Vec<&str> = bound
                    .iter()
                    .copied()
                    .filter(|column| !loaded.has_column(column))
                    .collect();
                row.push(loaded.height().to_string());
                row.push(list_or_dash(&missing));
            } else {
                row.push("-".to_string());
                row.push("not found".to_string());
            }
        }
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let rendered = config.to_toml_string().context("render config")?;
    print!("{rendered}");
    Ok(())
}

fn list_or_dash(values: &[&str]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join("\n")
    }
}

/// `--output`, or the default report name inside the input directory or
/// beside the input workbook.
fn output_path(args: &ReportArgs) -> PathBuf {
    if let Some(output) = &args.output {
        return output.clone();
    }
    if args.input.is_file() {
        let parent = args.input.parent().unwrap_or_else(|| Path::new(""));
        parent.join(DEFAULT_REPORT_NAME)
    } else {
        args.input.join(DEFAULT_REPORT_NAME)
    }
}
