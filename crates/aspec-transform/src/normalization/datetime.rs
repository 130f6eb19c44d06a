//! Date resolution for the date-bearing column.
//!
//! A raw cell is resolved to a calendar date by an ordered cascade; the first
//! rule that matches wins:
//!
//! 1. **Missing**: empty cell, whitespace-only text, or a missing marker
//!    (`N/A`, `NULL`, ...) resolves to the policy's sentinel date.
//! 2. **ISO literal**: `YYYY-MM-DD`, parsed strictly. A string with this shape
//!    that is not a real date (e.g. `2023-02-30`) falls through.
//! 3. **Month name / year**: `March/2022` (abbreviations accepted) -> day 1.
//! 4. **Numeric month / year**: `3/2022` or `03/2022` -> day 1.
//! 5. **Free form**: a fixed list of common layouts, see
//!    [`FREE_FORM_DATE_FORMATS`]. The day is taken from the input; only
//!    month-granularity layouts default it to 1.
//!
//! Anything else is [`DateResolution::Unresolved`]. Blank input and
//! unparseable input are deliberately treated differently: the former gets
//! the sentinel, the latter is left empty in the output.

use chrono::{Month, NaiveDate, NaiveDateTime};

use aspec_model::{Cell, DatePolicy};

/// Date-time layouts accepted by the free-form rule; only the date part is kept.
pub const FREE_FORM_DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date layouts accepted by the free-form rule. Numeric layouts are month-first.
pub const FREE_FORM_DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",   // 2023-7-4
    "%Y/%m/%d",   // 2023/07/04
    "%m/%d/%Y",   // 07/04/2023
    "%m-%d-%Y",   // 07-04-2023
    "%m.%d.%Y",   // 07.04.2023
    "%Y%m%d",     // 20230704
    "%d %B %Y",   // 4 July 2023
    "%d-%b-%Y",   // 04-Jul-2023
    "%B %d, %Y",  // July 4, 2023
    "%B %d %Y",   // July 4 2023
    "%b. %d, %Y", // Jul. 4, 2023
];

/// Month-granularity layouts accepted by the free-form rule (day becomes 1).
pub const FREE_FORM_MONTH_FORMATS: [&str; 2] = [
    "%B %Y", // July 2023
    "%Y-%m", // 2023-07
];

/// The cascade rule that produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateRule {
    Missing,
    IsoLiteral,
    MonthNameYear,
    NumericMonthYear,
    FreeForm,
}

impl DateRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::IsoLiteral => "iso_literal",
            Self::MonthNameYear => "month_name_year",
            Self::NumericMonthYear => "numeric_month_year",
            Self::FreeForm => "free_form",
        }
    }
}

/// Result of resolving one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateResolution {
    Resolved { date: NaiveDate, rule: DateRule },
    /// No rule could parse the value.
    Unresolved,
}

impl DateResolution {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Resolved { date, .. } => Some(*date),
            Self::Unresolved => None,
        }
    }

    pub fn rule(&self) -> Option<DateRule> {
        match self {
            Self::Resolved { rule, .. } => Some(*rule),
            Self::Unresolved => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// `YYYY-MM-DD`, or `None` when unresolved.
    pub fn to_iso8601(&self) -> Option<String> {
        self.date().map(format_iso8601_date)
    }

    /// Output cell: ISO text, or an empty cell when unresolved.
    pub fn into_cell(self) -> Cell {
        self.to_iso8601().map_or(Cell::Empty, Cell::Text)
    }
}

/// Format a date as ISO 8601 `YYYY-MM-DD`.
pub fn format_iso8601_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Resolve one cell to a date. Never fails; see the module docs for the cascade.
pub fn resolve_date(cell: &Cell, policy: &DatePolicy) -> DateResolution {
    match cell.to_text() {
        Some(text) => resolve_date_text(&text, policy),
        None => resolved(policy.sentinel, DateRule::Missing),
    }
}

/// Resolve raw text to a date.
pub fn resolve_date_text(value: &str, policy: &DatePolicy) -> DateResolution {
    let trimmed = value.trim();
    if trimmed.is_empty() || policy.is_missing_marker(trimmed) {
        return resolved(policy.sentinel, DateRule::Missing);
    }
    if let Some(date) = parse_iso_literal(trimmed) {
        return resolved(date, DateRule::IsoLiteral);
    }
    if let Some(date) = parse_month_name_year(trimmed) {
        return resolved(date, DateRule::MonthNameYear);
    }
    if let Some(date) = parse_numeric_month_year(trimmed) {
        return resolved(date, DateRule::NumericMonthYear);
    }
    if let Some(date) = parse_free_form(trimmed) {
        return resolved(date, DateRule::FreeForm);
    }
    DateResolution::Unresolved
}

fn resolved(date: NaiveDate, rule: DateRule) -> DateResolution {
    DateResolution::Resolved { date, rule }
}

/// Check for the exact `DDDD-DD-DD` shape.
fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

fn parse_iso_literal(value: &str) -> Option<NaiveDate> {
    if !is_iso_date_shape(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Split `<month>/<YYYY>` into its parts when the year is exactly four digits.
fn split_month_year(value: &str) -> Option<(&str, i32)> {
    let (month, year) = value.split_once('/')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    if year < 1 {
        return None;
    }
    Some((month, year))
}

fn parse_month_name_year(value: &str) -> Option<NaiveDate> {
    let (month, year) = split_month_year(value)?;
    if month.is_empty() || !month.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let month: Month = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
}

fn parse_numeric_month_year(value: &str) -> Option<NaiveDate> {
    let (month, year) = split_month_year(value)?;
    if !(1..=2).contains(&month.len()) || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn parse_free_form(value: &str) -> Option<NaiveDate> {
    for fmt in &FREE_FORM_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in &FREE_FORM_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }
    // The day is structurally absent here, so pin it to the first.
    for fmt in &FREE_FORM_MONTH_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{value} 01"), &format!("{fmt} %d")) {
            return Some(date);
        }
    }
    None
}
