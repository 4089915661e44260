//! CSV writer for metric records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use cch_model::MetricRecord;

use crate::error::{ReportError, Result};

/// Header row of the report.
pub const HEADER: [&str; 3] = ["Metric", "Value", "Description"];

#[derive(Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Metric")]
    metric: &'a str,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "Description")]
    description: &'a str,
}

impl<'a> From<&'a MetricRecord> for ReportRow<'a> {
    fn from(record: &'a MetricRecord) -> Self {
        Self {
            metric: &record.name,
            value: record.value.to_string(),
            description: &record.description,
        }
    }
}

/// Writes the report to any sink, header first.
///
/// The header is written even when `records` is empty.
pub fn write_to<W: Write>(out: W, records: &[MetricRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(ReportRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the report as a string.
pub fn render(records: &[MetricRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_to(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes the report to `path`, creating parent directories as needed.
pub fn write_report(path: &Path, records: &[MetricRecord]) -> Result<()> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let file = File::create(path).map_err(io_error)?;
    write_to(BufWriter::new(file), records)?;

    tracing::info!(path = %path.display(), records = records.len(), "Report written");
    Ok(())
}
