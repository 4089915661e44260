//! CSV table reading.
//!
//! Every export sheet carries its column header on the first row and one
//! metadata row beneath it. All cells are read as text; the engine applies
//! its own coercions.

use std::path::Path;

use polars::prelude::*;

use cch_model::{CellValue, Table};

use crate::error::{IngestError, Result};

/// Rows discarded between the header and the first data row.
pub const METADATA_ROWS: usize = 1;

/// Reads one CSV export into a [`Table`] named `name`.
pub fn read_table(path: &Path, name: &str) -> Result<Table> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    match scan_shape(&bytes) {
        Shape::Empty => {
            tracing::warn!(file = %path.display(), table = name, "Export is empty");
            return Ok(Table::empty(name));
        }
        Shape::HeaderOnly(columns) => {
            tracing::warn!(file = %path.display(), table = name, "Export has no data rows");
            return Ok(Table::new(name, columns));
        }
        Shape::Rows => {}
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows_after_header(METADATA_ROWS)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(dataframe_to_table(&df, name))
}

/// What a CSV export holds before the full parse.
#[derive(Debug, PartialEq)]
enum Shape {
    /// No header at all.
    Empty,
    /// A header and at most the metadata row.
    HeaderOnly(Vec<String>),
    Rows,
}

/// Peeks at the header and the first records; polars rejects files with
/// nothing to read past the metadata row.
fn scan_shape(bytes: &[u8]) -> Shape {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let columns: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(_) => return Shape::Rows,
    };
    if columns.is_empty() {
        return Shape::Empty;
    }
    let records = reader.records().take(METADATA_ROWS + 1).count();
    if records <= METADATA_ROWS {
        Shape::HeaderOnly(columns)
    } else {
        Shape::Rows
    }
}

/// Converts a DataFrame into a [`Table`] of tagged cells.
///
/// Empty strings become `Null`; numeric dtypes become `Number`.
pub fn dataframe_to_table(df: &DataFrame, name: &str) -> Table {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|column| column.to_string())
        .collect();
    let mut table = Table::new(name, columns);

    for idx in 0..df.height() {
        let row = df
            .get_columns()
            .iter()
            .map(|column| any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        table.push_row(row);
    }

    table
}

fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Null,
        AnyValue::String(s) => CellValue::from_text(s),
        AnyValue::StringOwned(s) => CellValue::from_text(&s),
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Number(v),
        other => CellValue::from_text(&other.to_string()),
    }
}
