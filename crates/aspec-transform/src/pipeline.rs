//! Workbook normalization pipeline.
//!
//! Each sheet is handled independently:
//!
//! 1. headers are renamed with the [`RenameTable`](aspec_model::RenameTable);
//! 2. if a renamed header equals the configured date column, every cell of
//!    that column is replaced with the ISO 8601 text of its resolved date, or
//!    an empty cell when it cannot be resolved.
//!
//! Sheet names, sheet order, row order, row count and every other column are
//! carried over unchanged. The input workbook is never modified.

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use aspec_model::{Cell, NormalizeOptions, Result, Sheet, Workbook};

use crate::normalization::{
    DateResolution, DateRule, HeaderChange, header_changes, normalize_headers, resolve_date,
};

/// Outcome of resolving one date column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateColumnReport {
    pub column_index: usize,
    /// Resolved cells per cascade rule.
    pub resolved: BTreeMap<DateRule, usize>,
    /// Spreadsheet row numbers (1-based, as the sheet shows them) left unresolved.
    pub unresolved_rows: Vec<usize>,
}

impl DateColumnReport {
    fn new(column_index: usize) -> Self {
        Self {
            column_index,
            ..Self::default()
        }
    }

    fn record(&mut self, spreadsheet_row: usize, resolution: &DateResolution) {
        match resolution.rule() {
            Some(rule) => *self.resolved.entry(rule).or_insert(0) += 1,
            None => self.unresolved_rows.push(spreadsheet_row),
        }
    }

    /// Cells filled with the sentinel date.
    pub fn defaulted(&self) -> usize {
        self.resolved.get(&DateRule::Missing).copied().unwrap_or(0)
    }

    /// Cells parsed from an actual date value.
    pub fn parsed(&self) -> usize {
        self.resolved
            .iter()
            .filter(|(rule, _)| **rule != DateRule::Missing)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn unresolved(&self) -> usize {
        self.unresolved_rows.len()
    }
}

/// What happened to one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet: String,
    pub rows: usize,
    pub columns: usize,
    pub renamed: Vec<HeaderChange>,
    /// One entry per column named like the date column; empty when absent.
    pub date_columns: Vec<DateColumnReport>,
}

impl SheetReport {
    pub fn has_date_column(&self) -> bool {
        !self.date_columns.is_empty()
    }

    pub fn parsed(&self) -> usize {
        self.date_columns.iter().map(DateColumnReport::parsed).sum()
    }

    pub fn defaulted(&self) -> usize {
        self.date_columns
            .iter()
            .map(DateColumnReport::defaulted)
            .sum()
    }

    pub fn unresolved(&self) -> usize {
        self.date_columns
            .iter()
            .map(DateColumnReport::unresolved)
            .sum()
    }
}

/// A normalized workbook together with per-sheet reports, in sheet order.
#[derive(Debug, Clone)]
pub struct NormalizedWorkbook {
    pub workbook: Workbook,
    pub reports: Vec<SheetReport>,
}

impl NormalizedWorkbook {
    pub fn unresolved_count(&self) -> usize {
        self.reports.iter().map(SheetReport::unresolved).sum()
    }

    pub fn has_unresolved(&self) -> bool {
        self.unresolved_count() > 0
    }
}

/// Normalize every sheet of a workbook.
pub fn normalize_workbook(
    workbook: &Workbook,
    options: &NormalizeOptions,
) -> Result<NormalizedWorkbook> {
    let mut sheets = Vec::with_capacity(workbook.len());
    let mut reports = Vec::with_capacity(workbook.len());
    for sheet in workbook.sheets() {
        let (normalized, report) = normalize_sheet(sheet, options)?;
        sheets.push(normalized);
        reports.push(report);
    }
    Ok(NormalizedWorkbook {
        workbook: Workbook::new(sheets)?,
        reports,
    })
}

/// Normalize one sheet: rename headers, then resolve the date column if present.
pub fn normalize_sheet(sheet: &Sheet, options: &NormalizeOptions) -> Result<(Sheet, SheetReport)> {
    let span = info_span!("sheet", sheet = %sheet.name());
    let _guard = span.enter();

    let before = sheet.headers();
    let after = normalize_headers(&before, &options.rename);
    let renamed = header_changes(&before, &after);
    for change in &renamed {
        debug!(from = %change.from, to = %change.to, column = change.index, "renamed header");
    }

    let date_indices: Vec<usize> = after
        .iter()
        .enumerate()
        .filter(|(_, name)| **name == options.date_column)
        .map(|(index, _)| index)
        .collect();

    let mut normalized = sheet.clone();
    normalized.rename_columns(after)?;

    let mut date_columns = Vec::with_capacity(date_indices.len());
    for index in date_indices {
        let mut report = DateColumnReport::new(index);
        normalized.map_column(index, |row, cell| {
            let spreadsheet_row = sheet.spreadsheet_row(row);
            let resolution = resolve_date(cell, &options.date_policy);
            if resolution.is_unresolved() {
                warn!(
                    column = %options.date_column,
                    row = spreadsheet_row,
                    value = %cell_display(cell),
                    "unresolved date"
                );
            }
            report.record(spreadsheet_row, &resolution);
            resolution.into_cell()
        })?;
        debug!(
            column = %options.date_column,
            parsed = report.parsed(),
            defaulted = report.defaulted(),
            unresolved = report.unresolved(),
            "resolved date column"
        );
        date_columns.push(report);
    }

    let report = SheetReport {
        sheet: sheet.name().to_string(),
        rows: normalized.row_count(),
        columns: normalized.column_count(),
        renamed,
        date_columns,
    };
    Ok((normalized, report))
}

fn cell_display(cell: &Cell) -> String {
    cell.to_text().map(Cow::into_owned).unwrap_or_default()
}
