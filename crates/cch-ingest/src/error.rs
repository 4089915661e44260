//! Error types for export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading exports.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input directory not found or not a directory.
    #[error("input directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export file not found.
    #[error("export file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read an export file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is neither a directory nor an `.xlsx` workbook.
    #[error("unsupported input {path}: expected a directory of CSV exports or an .xlsx workbook")]
    UnsupportedInput { path: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Workbook Errors ===
    /// Failed to open an `.xlsx` workbook.
    #[error("failed to open workbook {path}: {message}")]
    WorkbookOpen { path: PathBuf, message: String },

    /// Failed to read one sheet of a workbook.
    #[error("failed to read sheet {sheet} in {path}: {message}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        message: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
