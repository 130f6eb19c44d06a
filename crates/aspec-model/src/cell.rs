//! Cell values as read from a workbook sheet.

use std::borrow::Cow;

use chrono::{NaiveDateTime, NaiveTime};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No value.
    #[default]
    Empty,
    /// Text content, kept exactly as read (no trimming).
    Text(String),
    /// Numeric content. Integers are stored as whole floats.
    Number(f64),
    /// Boolean content.
    Bool(bool),
    /// A date or date-time cell.
    Date(NaiveDateTime),
    /// A spreadsheet error literal such as `#N/A` or `#DIV/0!`.
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Textual rendering of the cell, or `None` for an empty cell.
    ///
    /// Numbers render without a trailing `.0` when integral, dates render as
    /// `YYYY-MM-DD` at midnight and `YYYY-MM-DD HH:MM:SS` otherwise.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Empty => None,
            Self::Text(value) | Self::Error(value) => Some(Cow::Borrowed(value.as_str())),
            Self::Number(value) => Some(Cow::Owned(format_number(*value))),
            Self::Bool(value) => Some(Cow::Borrowed(if *value { "TRUE" } else { "FALSE" })),
            Self::Date(value) => Some(Cow::Owned(format_datetime(*value))),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

/// Formats a number the way a spreadsheet displays it in General format.
pub fn format_number(value: f64) -> String {
    // f64 Display never emits trailing zeros, so 3.0 renders as "3".
    format!("{value}")
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
