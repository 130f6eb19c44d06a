use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate sheet name '{name}'")]
    DuplicateSheet { name: String },

    #[error("column '{column}' in sheet '{sheet}' has {actual} cells, expected {expected}")]
    RaggedColumn {
        sheet: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} in sheet '{sheet}' has {actual} cells but the header has {expected}")]
    RowTooWide {
        sheet: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sheet '{sheet}' has {expected} columns, got {actual} names")]
    HeaderCount {
        sheet: String,
        expected: usize,
        actual: usize,
    },

    #[error("column index {index} out of range for sheet '{sheet}'")]
    ColumnIndex { sheet: String, index: usize },

    #[error("invalid rename table: {reason}")]
    InvalidRenameTable { reason: String },

    #[error("invalid options: {reason}")]
    InvalidOptions { reason: String },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
