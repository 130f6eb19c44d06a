//! Workbook output for normalized codelists.
//!
//! Serializes the [`aspec_model`] workbook to `.xlsx`, keeping sheet order,
//! header text and native cell types. The file is written in a single
//! bulk write after serialization succeeds.

mod error;
mod xlsx;

pub use error::{OutputError, Result};
pub use xlsx::{COLUMN_LIMIT, ROW_LIMIT, workbook_to_buffer, write_workbook};
