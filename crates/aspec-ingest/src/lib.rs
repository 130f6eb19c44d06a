//! Codelist workbook ingestion.
//!
//! Loads every sheet of a spreadsheet into the [`aspec_model`] workbook
//! representation:
//!
//! - **Workbook loading**: sheets in workbook order, first row as headers
//! - **Header handling**: blank headers named by position, duplicates suffixed
//! - **Cell conversion**: spreadsheet dates become date cells, error literals are kept
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use aspec_ingest::read_workbook;
//!
//! let workbook = read_workbook(Path::new("codelists.xlsx"))?;
//! for sheet in workbook.sheets() {
//!     println!("{}: {} rows", sheet.name(), sheet.row_count());
//! }
//! ```

mod error;
mod header;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Workbook Reading ===
pub use header::{UNNAMED_PREFIX, header_names};
pub use workbook::{convert_cell, read_workbook, sheet_from_range};
