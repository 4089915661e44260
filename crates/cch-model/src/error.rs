use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or rendering metrics configuration.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    TomlInline(#[from] toml::de::Error),

    #[error("failed to render TOML config: {0}")]
    TomlRender(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Signal returned when a table lacks columns a computation needs.
///
/// This is not a failure of the run: metric functions consume it and fall
/// back to their zero value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("table '{table}' is missing required columns: {}", .columns.join(", "))]
pub struct MissingColumns {
    pub table: String,
    pub columns: Vec<String>,
}
