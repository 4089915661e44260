//! CLI argument definitions for the CCH metrics report.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cch_cli::dates::parse_date_arg;

#[derive(Parser)]
#[command(
    name = "cch",
    version,
    about = "CCH metrics - program-performance report from case-management exports",
    long_about = "Compute the care coordination hub performance metrics from the case-management\n\
                  export workbook (.xlsx) or a directory of its per-sheet CSV exports, and write\n\
                  them as a Metric,Value,Description CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the metrics report for an export directory.
    Report(ReportArgs),

    /// List the tables the engine reads and the columns bound for each.
    Tables(TablesArgs),

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Export workbook (.xlsx) or a directory holding one CSV per table.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report file to write (default: cch_metrics.csv next to the input).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// First day of the reporting period.
    #[arg(long = "start", value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last day of the reporting period.
    ///
    /// Without both --start and --end every record is in range.
    #[arg(long = "end", value_name = "YYYY-MM-DD", value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// TOML file overriding column bindings and vocabularies.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Compute and print the report without writing the CSV.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Export workbook or directory to inspect; shows which tables were found.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// TOML file overriding column bindings.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// TOML file to merge over the defaults before printing.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
