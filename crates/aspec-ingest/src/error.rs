//! Error types for workbook ingestion.

use std::path::PathBuf;

use aspec_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a workbook.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input workbook does not exist or is not a file.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file could not be opened as a spreadsheet.
    #[error("failed to open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// A sheet listed by the workbook could not be read.
    #[error("failed to read sheet '{sheet}': {source}")]
    SheetRead {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// The loaded data violates a model invariant (e.g. duplicate sheet names).
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
