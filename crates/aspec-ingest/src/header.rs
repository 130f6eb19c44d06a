//! Header row handling.

use aspec_model::{Cell, dedupe_headers};

/// Prefix given to blank header cells, followed by the zero-based column index.
pub const UNNAMED_PREFIX: &str = "Unnamed: ";

/// Builds unique column names from the header row.
///
/// Blank cells become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
/// suffixes. Non-blank names are kept exactly as written.
pub fn header_names(row: &[Cell]) -> Vec<String> {
    let names = row
        .iter()
        .enumerate()
        .map(|(index, cell)| match cell.to_text() {
            Some(text) if !text.is_empty() => text.into_owned(),
            _ => format!("{UNNAMED_PREFIX}{index}"),
        })
        .collect();
    dedupe_headers(names)
}
