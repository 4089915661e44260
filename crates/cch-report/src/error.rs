//! Error types for report output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create the output file or its directory.
    #[error("failed to create report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a record.
    #[error("failed to write report CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to flush buffered output.
    #[error("failed to flush report output: {0}")]
    Flush(#[from] std::io::Error),

    #[error("report output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
