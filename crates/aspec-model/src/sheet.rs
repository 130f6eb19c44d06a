//! Sheets and workbooks.
//!
//! A [`Sheet`] is column-oriented: every column carries the same number of
//! cells, which is the sheet's row count (excluding the header row).

use std::collections::BTreeSet;

use crate::cell::Cell;
use crate::error::{ModelError, Result};

/// A named column and its cells, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    columns: Vec<Column>,
    row_count: usize,
    header_row: usize,
}

impl Sheet {
    /// Builds a sheet from columns that must all have the same length.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        let row_count = columns.first().map_or(0, |column| column.cells.len());
        if let Some(column) = columns.iter().find(|c| c.cells.len() != row_count) {
            return Err(ModelError::RaggedColumn {
                sheet: name,
                column: column.name.clone(),
                expected: row_count,
                actual: column.cells.len(),
            });
        }
        Ok(Self {
            name,
            columns,
            row_count,
            header_row: 1,
        })
    }

    /// Builds a sheet from a header row and data rows.
    ///
    /// Short rows are padded with empty cells; rows wider than the header are
    /// rejected.
    pub fn from_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self> {
        let name = name.into();
        let width = headers.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|header| Column::new(header, Vec::with_capacity(rows.len())))
            .collect();
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(ModelError::RowTooWide {
                    sheet: name,
                    row: row_index + 1,
                    expected: width,
                    actual: row.len(),
                });
            }
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or_default());
            }
        }
        Self::new(name, columns)
    }

    /// Records the 1-based spreadsheet row the header was read from.
    #[must_use]
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based spreadsheet row of the header (1 unless read from a range
    /// that starts lower).
    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Spreadsheet row number of the data row at `index` (zero-based).
    pub fn spreadsheet_row(&self, index: usize) -> usize {
        self.header_row + 1 + index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|index| &self.columns[index])
    }

    /// Replaces every column name, keeping order and content.
    pub fn rename_columns(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(ModelError::HeaderCount {
                sheet: self.name.clone(),
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
        Ok(())
    }

    /// Rewrites the cells of one column in place; `map` receives the zero-based
    /// data row index and the current cell.
    pub fn map_column<F>(&mut self, index: usize, mut map: F) -> Result<()>
    where
        F: FnMut(usize, &Cell) -> Cell,
    {
        let Some(column) = self.columns.get_mut(index) else {
            return Err(ModelError::ColumnIndex {
                sheet: self.name.clone(),
                index,
            });
        };
        for (row, cell) in column.cells.iter_mut().enumerate() {
            *cell = map(row, cell);
        }
        Ok(())
    }
}

/// An ordered collection of sheets with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Result<Self> {
        let mut workbook = Self::default();
        for sheet in sheets {
            workbook.push(sheet)?;
        }
        Ok(workbook)
    }

    pub fn push(&mut self, sheet: Sheet) -> Result<()> {
        if self.sheet(sheet.name()).is_some() {
            return Err(ModelError::DuplicateSheet {
                name: sheet.name().to_string(),
            });
        }
        self.sheets.push(sheet);
        Ok(())
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }
}

/// Makes header names unique in order: repeats of `Name` become `Name.1`,
/// `Name.2`, and so on, skipping any candidate already in use.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut result = Vec::with_capacity(headers.len());
    for header in headers {
        if seen.insert(header.clone()) {
            result.push(header);
            continue;
        }
        let mut suffix = 1usize;
        let unique = loop {
            let candidate = format!("{header}.{suffix}");
            if !seen.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        seen.insert(unique.clone());
        result.push(unique);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str, values: &[&str]) -> Column {
        Column::new(name, values.iter().map(|v| Cell::from(*v)).collect())
    }

    #[test]
    fn new_rejects_ragged_columns() {
        let err = Sheet::new(
            "Codes",
            vec![text_column("A", &["1", "2"]), text_column("B", &["1"])],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::RaggedColumn { actual: 1, .. }));
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let sheet = Sheet::from_rows(
            "Codes",
            vec!["A".into(), "B".into()],
            vec![vec![Cell::from("x")], vec![Cell::from("y"), Cell::from("z")]],
        )
        .unwrap();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.columns()[1].cells, vec![Cell::Empty, Cell::from("z")]);
    }

    #[test]
    fn from_rows_rejects_wide_rows() {
        let err = Sheet::from_rows(
            "Codes",
            vec!["A".into()],
            vec![vec![Cell::from("x"), Cell::from("y")]],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::RowTooWide { row: 1, .. }));
    }

    #[test]
    fn spreadsheet_rows_follow_the_header_row() {
        let sheet = Sheet::new("Codes", vec![text_column("A", &["1", "2"])]).unwrap();
        assert_eq!(sheet.header_row(), 1);
        assert_eq!(sheet.spreadsheet_row(0), 2);

        let shifted = sheet.with_header_row(4);
        assert_eq!(shifted.spreadsheet_row(1), 6);
        assert_eq!(shifted.clone().with_header_row(0).header_row(), 1);
    }

    #[test]
    fn rename_requires_matching_count() {
        let mut sheet = Sheet::new("Codes", vec![text_column("A", &["1"])]).unwrap();
        assert!(sheet.rename_columns(vec![]).is_err());
        sheet.rename_columns(vec!["B".into()]).unwrap();
        assert_eq!(sheet.headers(), vec!["B"]);
    }

    #[test]
    fn map_column_keeps_length() {
        let mut sheet = Sheet::new("Codes", vec![text_column("A", &["1", "2"])]).unwrap();
        sheet
            .map_column(0, |row, _| Cell::Number(row as f64))
            .unwrap();
        assert_eq!(
            sheet.columns()[0].cells,
            vec![Cell::Number(0.0), Cell::Number(1.0)]
        );
        assert!(sheet.map_column(4, |_, cell| cell.clone()).is_err());
    }

    #[test]
    fn workbook_rejects_duplicate_names() {
        let first = Sheet::new("Codes", vec![]).unwrap();
        let second = Sheet::new("Codes", vec![]).unwrap();
        let err = Workbook::new(vec![first, second]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateSheet { .. }));
    }

    #[test]
    fn dedupe_appends_suffixes() {
        let headers = vec![
            "Code".to_string(),
            "Code".to_string(),
            "Code.1".to_string(),
            "Code".to_string(),
        ];
        assert_eq!(
            dedupe_headers(headers),
            vec!["Code", "Code.1", "Code.1.1", "Code.2"]
        );
    }
}
