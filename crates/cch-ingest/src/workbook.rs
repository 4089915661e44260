//! `.xlsx` workbook reading.
//!
//! The case-management system exports one workbook with a sheet per table.
//! Sheets are matched to [`TableName`] case-insensitively and laid out like
//! the CSV exports: a header row, one metadata row, then data.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use cch_model::{CellValue, Table, TableName, Tables};

use crate::error::{IngestError, Result};
use crate::reader::METADATA_ROWS;

/// True when `path` names an `.xlsx` or `.xlsm` file.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"))
}

/// Reads every relevant sheet of the workbook at `path`.
///
/// Sheets that name no relevant table are skipped. When two sheets map to the
/// same table, the first in workbook order wins.
pub fn read_workbook(path: &Path) -> Result<Tables> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook::<Xlsx<_>, _>(path).map_err(|e| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut tables = Tables::new();
    for sheet in workbook.sheet_names() {
        let Some(name) = TableName::from_sheet_name(&sheet) else {
            tracing::debug!(sheet = %sheet, "Ignoring sheet that names no relevant table");
            continue;
        };
        if tables.is_loaded(name) {
            tracing::warn!(
                table = %name,
                sheet = %sheet,
                "Duplicate sheet for table, keeping the first"
            );
            continue;
        }
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| IngestError::SheetRead {
                path: path.to_path_buf(),
                sheet: sheet.clone(),
                message: e.to_string(),
            })?;
        let table = range_to_table(&range, name.sheet_name());
        if table.height() == 0 {
            tracing::warn!(table = %name, sheet = %sheet, "Sheet has no data rows");
        }
        tables.insert(name, table);
    }

    Ok(tables)
}

/// Converts a sheet range into a [`Table`], dropping the metadata row.
///
/// Blank header cells are named `Unnamed: <index>`.
pub fn range_to_table(range: &Range<Data>, name: &str) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::empty(name);
    };
    let columns = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match data_to_cell(cell).as_text() {
            Some(text) => text.into_owned(),
            None => format!("Unnamed: {idx}"),
        })
        .collect();

    let mut table = Table::new(name, columns);
    for row in rows.skip(METADATA_ROWS) {
        table.push_row(row.iter().map(data_to_cell).collect());
    }
    table
}

fn data_to_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Bool(v) => CellValue::Text(v.to_string()),
        Data::DateTime(v) => v.as_datetime().map_or(CellValue::Null, CellValue::Timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(rows: &[&[Data]]) -> Range<Data> {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), value.clone());
            }
        }
        range
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_is_workbook_by_extension() {
        assert!(is_workbook(Path::new("exports/q1.xlsx")));
        assert!(is_workbook(Path::new("exports/q1.XLSM")));
        assert!(!is_workbook(Path::new("exports/Client.csv")));
        assert!(!is_workbook(Path::new("exports")));
    }

    #[test]
    fn test_range_to_table_skips_metadata_row() {
        let range = range(&[
            &[text("Client_Id"), text("Score")],
            &[text("ID"), text("Score label")],
            &[Data::Int(1042), Data::Float(6.0)],
            &[text("B7"), Data::Empty],
        ]);
        let table = range_to_table(&range, "Ahpscreening");

        assert_eq!(table.columns(), &["Client_Id", "Score"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(0, "Client_Id"), Some(&CellValue::Number(1042.0)));
        assert_eq!(table.cell(0, "Score"), Some(&CellValue::Number(6.0)));
        assert_eq!(table.cell(1, "Client_Id"), Some(&CellValue::from("B7")));
        assert_eq!(table.cell(1, "Score"), Some(&CellValue::Null));
    }

    #[test]
    fn test_range_to_table_header_only_and_empty() {
        let header_only = range(&[&[text("Client_Id"), text("Client_CreateStamp")], &[text("ID")]]);
        let table = range_to_table(&header_only, "Client");
        assert_eq!(table.columns(), &["Client_Id", "Client_CreateStamp"]);
        assert_eq!(table.height(), 0);

        let table = range_to_table(&Range::empty(), "Client");
        assert!(table.columns().is_empty());
        assert_eq!(table.height(), 0);
    }

    #[test]
    fn test_blank_header_cells_are_named_by_index() {
        let range = range(&[&[text("Client_Id"), Data::Empty], &[text("meta")]]);
        let table = range_to_table(&range, "Client");
        assert_eq!(table.columns(), &["Client_Id", "Unnamed: 1"]);
    }

    #[test]
    fn test_iso_datetimes_and_errors() {
        let iso = data_to_cell(&text("2025-01-05T09:00:00"));
        assert_eq!(
            iso.to_timestamp(),
            NaiveDate::from_ymd_opt(2025, 1, 5).and_then(|d| d.and_hms_opt(9, 0, 0))
        );
        assert_eq!(
            data_to_cell(&Data::DateTimeIso("2025-01-05".to_string())).to_timestamp(),
            NaiveDate::from_ymd_opt(2025, 1, 5).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(
            data_to_cell(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Null
        );
        assert_eq!(data_to_cell(&Data::Bool(true)), CellValue::from("true"));
    }

    #[test]
    fn test_missing_workbook() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = read_workbook(&dir.path().join("export.xlsx"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_corrupt_workbook() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("export.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();
        let result = read_workbook(&path);
        assert!(matches!(result, Err(IngestError::WorkbookOpen { .. })));
    }
}
