//! Export ingestion for the CCH metrics engine.
//!
//! The case-management system exports one sheet per table. This crate reads
//! either the `.xlsx` workbook itself or a directory holding those sheets as
//! CSV files (`Client.csv`, `Interaction_referral.csv`, ...) into
//! [`cch_model::Tables`].
//!
//! - **Discovery**: match CSV file stems to the six relevant sheet names
//! - **Reading**: header row, one discarded metadata row, every CSV cell as text
//! - **Workbooks**: sheets matched by name, typed cells mapped to `CellValue`
//!
//! ```ignore
//! use std::path::Path;
//! use cch_ingest::load_tables;
//!
//! let tables = load_tables(Path::new("exports/2025-q1"))?;
//! ```

mod discovery;
mod error;
mod loader;
mod reader;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{DiscoveredTable, discover_tables, list_csv_files};

// === CSV Reading ===
pub use reader::{METADATA_ROWS, dataframe_to_table, read_table};

// === Workbook Reading ===
pub use workbook::{is_workbook, read_workbook};

// === Loading ===
pub use loader::load_tables;
