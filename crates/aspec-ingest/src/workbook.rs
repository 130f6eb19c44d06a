//! Workbook loading with `calamine`.
//!
//! The first row of each sheet's used range is the header row; every row
//! after it is data. Sheets keep the order the workbook lists them in.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use aspec_model::{Cell, Sheet, Workbook};

use crate::error::{IngestError, Result};
use crate::header::header_names;

/// Reads every sheet of a spreadsheet file (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
pub fn read_workbook(path: &Path) -> Result<Workbook> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = open_workbook_auto(path).map_err(|source| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut workbook = Workbook::default();
    for name in reader.sheet_names() {
        let range = reader
            .worksheet_range(&name)
            .map_err(|source| IngestError::SheetRead {
                sheet: name.clone(),
                source,
            })?;
        let sheet = sheet_from_range(&name, &range)?;
        debug!(
            sheet = %name,
            rows = sheet.row_count(),
            columns = sheet.column_count(),
            "loaded sheet"
        );
        workbook.push(sheet)?;
    }
    info!(
        path = %path.display(),
        sheet_count = workbook.len(),
        "workbook loaded"
    );
    Ok(workbook)
}

/// Converts a used range into a sheet, taking the first row as headers.
///
/// The sheet remembers which spreadsheet row the header came from, so row
/// numbers in reports match what the user sees.
pub fn sheet_from_range(name: &str, range: &Range<Data>) -> Result<Sheet> {
    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let mut rows = range.rows();
    let Some(header_row_cells) = rows.next() else {
        return Ok(Sheet::new(name, Vec::new())?);
    };
    let header_cells: Vec<Cell> = header_row_cells.iter().map(convert_cell).collect();
    let headers = header_names(&header_cells);
    let data: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    Ok(Sheet::from_rows(name, headers, data)?.with_header_row(header_row))
}

/// Maps a reader value onto the model's cell type.
///
/// Date cells go through the reader's own conversion, which honors the
/// workbook's 1900 or 1904 date system.
pub fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(value) if value.is_empty() => Cell::Empty,
        Data::String(value) => Cell::Text(value.clone()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Bool(*value),
        Data::DateTime(value) if value.is_datetime() => value
            .as_datetime()
            .map_or(Cell::Number(value.as_f64()), Cell::Date),
        Data::DateTime(value) => Cell::Number(value.as_f64()),
        Data::DateTimeIso(value) => {
            parse_iso_datetime(value).map_or_else(|| Cell::Text(value.clone()), Cell::Date)
        }
        Data::DurationIso(value) => Cell::Text(value.clone()),
        Data::Error(error) => Cell::Error(error.to_string()),
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
