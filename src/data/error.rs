use std::path::PathBuf;

use thiserror::Error;

/// Reasons a dataset could not be loaded. Any of these ends the session's
/// analysis: nothing is computed from a partially read file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("dataset contains no employee records")]
    EmptyDataset,
}

impl DataLoadError {
    pub(crate) fn invalid(row: usize, column: &str, reason: impl Into<String>) -> Self {
        DataLoadError::InvalidValue {
            row,
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}
