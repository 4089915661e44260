//! Input loading into the engine's input mapping.

use std::path::Path;

use cch_model::{TableName, Tables};

use crate::discovery::discover_tables;
use crate::error::{IngestError, Result};
use crate::reader::read_table;
use crate::workbook::{is_workbook, read_workbook};

/// Loads every relevant sheet from `input`.
///
/// `input` is either an `.xlsx` workbook or a directory of per-sheet CSV
/// exports. Sheets that are absent are left out of the mapping; the engine
/// treats them as empty tables.
pub fn load_tables(input: &Path) -> Result<Tables> {
    let span = tracing::info_span!("load_tables", input = %input.display());
    let _guard = span.enter();

    let tables = if is_workbook(input) {
        read_workbook(input)?
    } else if input.is_file() {
        return Err(IngestError::UnsupportedInput {
            path: input.to_path_buf(),
        });
    } else {
        load_directory(input)?
    };

    for name in TableName::ALL {
        if tables.is_loaded(name) {
            let table = tables.get(name);
            tracing::info!(
                table = %name,
                rows = table.height(),
                columns = table.columns().len(),
                "Loaded table"
            );
        } else {
            tracing::warn!(table = %name, "No export found for table");
        }
    }

    Ok(tables)
}

fn load_directory(dir: &Path) -> Result<Tables> {
    let mut tables = Tables::new();
    for discovered in discover_tables(dir)? {
        let table = read_table(&discovered.path, discovered.name.sheet_name())?;
        tables.insert(discovered.name, table);
    }
    Ok(tables)
}
