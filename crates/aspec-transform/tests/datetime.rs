//! Tests for the date resolution cascade.

use chrono::{Datelike, Month, NaiveDate};
use proptest::prelude::*;

use aspec_model::{Cell, DatePolicy};
use aspec_transform::{DateResolution, DateRule, resolve_date, resolve_date_text};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn resolve(value: &str) -> DateResolution {
    resolve_date_text(value, &DatePolicy::default())
}

fn iso(value: &str) -> Option<String> {
    resolve(value).to_iso8601()
}

#[test]
fn end_to_end_examples() {
    assert_eq!(iso("2023-07-04").as_deref(), Some("2023-07-04"));
    assert_eq!(iso("").as_deref(), Some("2019-05-31"));
    assert_eq!(iso("March/2022").as_deref(), Some("2022-03-01"));
    assert_eq!(iso("3/2022").as_deref(), Some("2022-03-01"));
    assert_eq!(iso("07-04-2023 extra text"), None);
    assert_eq!(iso("07-04-2023").as_deref(), Some("2023-07-04"));
}

#[test]
fn rules_are_reported() {
    assert_eq!(resolve("  ").rule(), Some(DateRule::Missing));
    assert_eq!(resolve("2023-07-04").rule(), Some(DateRule::IsoLiteral));
    assert_eq!(resolve("March/2022").rule(), Some(DateRule::MonthNameYear));
    assert_eq!(resolve("03/2022").rule(), Some(DateRule::NumericMonthYear));
    assert_eq!(resolve("July 4, 2023").rule(), Some(DateRule::FreeForm));
    assert_eq!(resolve("not a date").rule(), None);
}

#[test]
fn missing_cells_get_the_sentinel() {
    let policy = DatePolicy::default();
    let sentinel = ymd(2019, 5, 31);
    for cell in [
        Cell::Empty,
        Cell::text(""),
        Cell::text(" \t\n"),
        Cell::text("N/A"),
        Cell::text(" NULL "),
        Cell::Error("#N/A".to_string()),
    ] {
        assert_eq!(resolve_date(&cell, &policy).date(), Some(sentinel), "{cell:?}");
    }
}

#[test]
fn garbage_is_unresolved_not_sentinel() {
    for value in ["not a date", "TBD", "#DIV/0!", "13/2022", "2023-13-45"] {
        assert_eq!(resolve(value), DateResolution::Unresolved, "{value}");
    }
}

#[test]
fn malformed_iso_falls_through() {
    // Shaped like ISO but not a real day, and no later rule accepts it.
    assert_eq!(resolve("2023-02-30"), DateResolution::Unresolved);
    // Unpadded ISO is not a literal match but the free-form rule reads it.
    assert_eq!(
        resolve("2023-7-4"),
        DateResolution::Resolved {
            date: ymd(2023, 7, 4),
            rule: DateRule::FreeForm,
        }
    );
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(iso("  2023-07-04\t").as_deref(), Some("2023-07-04"));
    assert_eq!(iso(" March/2022 ").as_deref(), Some("2022-03-01"));
}

#[test]
fn date_cells_keep_their_day() {
    let policy = DatePolicy::default();
    let midnight = ymd(2021, 11, 9).and_hms_opt(0, 0, 0).unwrap();
    let resolution = resolve_date(&Cell::Date(midnight), &policy);
    assert_eq!(resolution.date(), Some(ymd(2021, 11, 9)));
    assert_eq!(resolution.rule(), Some(DateRule::IsoLiteral));

    let evening = ymd(2021, 11, 9).and_hms_opt(18, 45, 0).unwrap();
    let resolution = resolve_date(&Cell::Date(evening), &policy);
    assert_eq!(resolution.date(), Some(ymd(2021, 11, 9)));
    assert_eq!(resolution.rule(), Some(DateRule::FreeForm));
}

#[test]
fn numbers_are_not_dates() {
    let policy = DatePolicy::default();
    assert!(resolve_date(&Cell::Number(44927.0), &policy).is_unresolved());
    assert!(resolve_date(&Cell::Bool(true), &policy).is_unresolved());
}

#[test]
fn custom_policy_sentinel_and_markers() {
    let policy = DatePolicy {
        sentinel: ymd(2000, 1, 1),
        missing_markers: vec!["-".to_string()],
    };
    assert_eq!(resolve_date_text("-", &policy).date(), Some(ymd(2000, 1, 1)));
    assert!(resolve_date_text("N/A", &policy).is_unresolved());
}

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

proptest! {
    #[test]
    fn whitespace_only_resolves_to_sentinel(value in "[ \t\r\n]{0,8}") {
        prop_assert_eq!(resolve(&value).date(), Some(ymd(2019, 5, 31)));
    }

    #[test]
    fn valid_iso_dates_are_unchanged(year in 1000i32..=9999, ordinal in 1u32..=365) {
        let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
        let text = date.format("%Y-%m-%d").to_string();
        let resolution = resolve(&text);
        prop_assert_eq!(resolution.rule(), Some(DateRule::IsoLiteral));
        prop_assert_eq!(resolution.to_iso8601(), Some(text));
    }

    #[test]
    fn month_name_year_pins_day_one(year in 1000i32..=9999, month in 0usize..12, upper in any::<bool>()) {
        let name = MONTHS[month].name();
        let name = if upper { name.to_uppercase() } else { name.to_string() };
        let date = resolve(&format!("{name}/{year}")).date().unwrap();
        prop_assert_eq!(date.day(), 1);
        prop_assert_eq!(date.month(), MONTHS[month].number_from_month());
        prop_assert_eq!(date.year(), year);
    }

    #[test]
    fn numeric_month_year_pins_day_one(year in 1000i32..=9999, month in 1u32..=12, padded in any::<bool>()) {
        let text = if padded { format!("{month:02}/{year}") } else { format!("{month}/{year}") };
        let resolution = resolve(&text);
        prop_assert_eq!(resolution.rule(), Some(DateRule::NumericMonthYear));
        prop_assert_eq!(resolution.date(), Some(ymd(year, month, 1)));
    }

    #[test]
    fn alphabetic_noise_is_unresolved(value in "[a-z]{5,12}( [a-z]{2,8})?") {
        // No English month name is followed by a year here, so nothing can match.
        prop_assert_eq!(resolve(&value), DateResolution::Unresolved);
    }
}
