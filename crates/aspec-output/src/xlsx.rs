//! Workbook serialization with `rust_xlsxwriter`.

use std::fs;
use std::path::Path;

use chrono::{Datelike, NaiveTime};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use tracing::{debug, info};

use aspec_model::{Cell, Sheet, Workbook};

use crate::error::{OutputError, Result};

/// Number of rows a worksheet can hold, header row included.
pub const ROW_LIMIT: usize = 1_048_576;
/// Number of columns a worksheet can hold.
pub const COLUMN_LIMIT: usize = 16_384;

/// First year the 1900 date system can represent.
const FIRST_SERIAL_YEAR: i32 = 1900;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serializes the workbook and writes it to `path` in one write.
///
/// Nothing touches the destination until the whole workbook has been
/// serialized, so a failure leaves any existing file intact.
pub fn write_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    let buffer = workbook_to_buffer(workbook)?;
    ensure_parent_dir(path)?;
    fs::write(path, &buffer).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        sheet_count = workbook.len(),
        bytes = buffer.len(),
        "workbook written"
    );
    Ok(())
}

/// Serializes the workbook to `.xlsx` bytes.
pub fn workbook_to_buffer(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut xlsx = XlsxWorkbook::new();
    let formats = CellFormats::new();
    for sheet in workbook.sheets() {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(sheet.name())?;
        write_sheet(worksheet, sheet, &formats)?;
        debug!(
            sheet = %sheet.name(),
            rows = sheet.row_count(),
            columns = sheet.column_count(),
            "serialized sheet"
        );
    }
    Ok(xlsx.save_to_buffer()?)
}

struct CellFormats {
    date: Format,
    datetime: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_FORMAT),
            datetime: Format::new().set_num_format(DATETIME_FORMAT),
        }
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, formats: &CellFormats) -> Result<()> {
    if sheet.row_count() >= ROW_LIMIT {
        return Err(OutputError::RowOutOfRange {
            sheet: sheet.name().to_string(),
            row: sheet.row_count() + 1,
        });
    }
    for (index, column) in sheet.columns().iter().enumerate() {
        let col = u16::try_from(index)
            .ok()
            .filter(|_| index < COLUMN_LIMIT)
            .ok_or_else(|| OutputError::ColumnOutOfRange {
                sheet: sheet.name().to_string(),
                column: index + 1,
            })?;
        worksheet.write_string(0, col, column.name.as_str())?;
        for (offset, cell) in column.cells.iter().enumerate() {
            let row = u32::try_from(offset + 1).map_err(|_| OutputError::RowOutOfRange {
                sheet: sheet.name().to_string(),
                row: offset + 2,
            })?;
            write_cell(worksheet, row, col, cell, formats)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &CellFormats,
) -> Result<()> {
    match cell {
        Cell::Empty => {}
        Cell::Text(value) | Cell::Error(value) => {
            worksheet.write_string(row, col, value.as_str())?;
        }
        Cell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        // The writer would emit a negative serial here; keep the ISO text.
        Cell::Date(value) if value.year() < FIRST_SERIAL_YEAR => {
            let text = cell.to_text().unwrap_or_default();
            worksheet.write_string(row, col, text.into_owned())?;
        }
        Cell::Date(value) => {
            let format = if value.time() == NaiveTime::MIN {
                &formats.date
            } else {
                &formats.datetime
            };
            worksheet.write_datetime_with_format(row, col, value, format)?;
        }
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
