//! Codelist workbook transformation.
//!
//! - **normalization**: header renaming and the date resolution cascade
//! - **pipeline**: per-sheet and whole-workbook normalization with reports

pub mod normalization;
pub mod pipeline;

pub use normalization::{
    DateResolution, DateRule, HeaderChange, format_iso8601_date, normalize_headers, resolve_date,
    resolve_date_text,
};
pub use pipeline::{
    DateColumnReport, NormalizedWorkbook, SheetReport, normalize_sheet, normalize_workbook,
};
