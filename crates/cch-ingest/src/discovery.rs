//! File discovery for export directories.

use std::path::{Path, PathBuf};

use cch_model::TableName;

use crate::error::{IngestError, Result};

/// A CSV export matched to one of the relevant sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTable {
    pub name: TableName,
    pub path: PathBuf,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Matches CSV files to sheet names by case-insensitive file stem.
///
/// Files that name no relevant sheet are skipped. When two files map to the
/// same sheet, the first in filename order wins.
pub fn discover_tables(dir: &Path) -> Result<Vec<DiscoveredTable>> {
    let mut found: Vec<DiscoveredTable> = Vec::new();

    for path in list_csv_files(dir)? {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(name) = TableName::from_sheet_name(stem) else {
            tracing::debug!(file = %path.display(), "Ignoring CSV that names no relevant table");
            continue;
        };
        if found.iter().any(|table| table.name == name) {
            tracing::warn!(
                table = %name,
                file = %path.display(),
                "Duplicate export for table, keeping the first"
            );
            continue;
        }
        found.push(DiscoveredTable { name, path });
    }

    found.sort_by_key(|table| table.name);
    Ok(found)
}
