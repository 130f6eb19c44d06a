//! Normalization functions for codelist sheets.
//!
//! - **datetime**: date resolution cascade and ISO 8601 formatting
//! - **headers**: exact and substring header renaming

pub mod datetime;
pub mod headers;

pub use datetime::{DateResolution, DateRule, format_iso8601_date, resolve_date, resolve_date_text};
pub use headers::{HeaderChange, header_changes, normalize_headers};
