//! Data model for A-SPEC codelist workbook normalization.
//!
//! - **cell**: spreadsheet cell values
//! - **sheet**: column-oriented sheets and ordered workbooks
//! - **options**: rename table, date policy and pipeline options
//! - **error**: model and configuration errors

pub mod cell;
pub mod error;
pub mod options;
pub mod sheet;

pub use cell::{Cell, format_number};
pub use error::{ModelError, Result};
pub use options::{
    DEFAULT_DATE_COLUMN, DEFAULT_MISSING_MARKERS, DEFAULT_SENTINEL_DATE, DatePolicy,
    NormalizeOptions, RenameTable, SPEC_COVERAGE_HEADER, SPEC_COVERAGE_MARKER, SubstringRename,
};
pub use sheet::{Column, Sheet, Workbook, dedupe_headers};
