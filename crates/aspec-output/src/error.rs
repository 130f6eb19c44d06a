//! Error types for workbook output.

use std::io;
use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors that can occur while writing a workbook.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The xlsx writer rejected a value or failed to serialize.
    #[error("xlsx serialization failed: {0}")]
    Xlsx(#[from] XlsxError),

    /// A sheet has more rows than the format allows.
    #[error("sheet '{sheet}': row {row} is beyond the worksheet row limit")]
    RowOutOfRange { sheet: String, row: usize },

    /// A sheet has more columns than the format allows.
    #[error("sheet '{sheet}': column {column} is beyond the worksheet column limit")]
    ColumnOutOfRange { sheet: String, column: usize },

    /// The destination directory could not be created.
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The serialized workbook could not be written to disk.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
