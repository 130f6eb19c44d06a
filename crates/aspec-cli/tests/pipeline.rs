//! End-to-end tests: spreadsheet in, normalized spreadsheet out.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Format, Workbook};
use tempfile::TempDir;

use aspec_cli::pipeline::{default_output_path, ingest, load_options, normalize, output};

fn write_input(path: &Path) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let codes = workbook.add_worksheet();
    codes.set_name("Codes").unwrap();
    let headers = [
        "CODELIST",
        "Code",
        "Date Added or Modified",
        "Codes involved in both DDS and ABC",
    ];
    for (col, header) in headers.iter().enumerate() {
        codes.write_string(0, col as u16, *header).unwrap();
    }
    let rows: [(&str, &str, Option<&str>); 6] = [
        ("SEX", "M", None),
        ("SEX", "F", Some("")),
        ("RACE", "1", Some("March/2022")),
        ("RACE", "2", Some("3/2022")),
        ("RACE", "3", Some("not a date")),
        ("UNIT", "kg", Some("July 4, 2023")),
    ];
    for (offset, (list, code, date)) in rows.iter().enumerate() {
        let row = offset as u32 + 1;
        codes.write_string(row, 0, *list).unwrap();
        codes.write_string(row, 1, *code).unwrap();
        match date {
            None => {
                codes
                    .write_number_with_format(row, 2, 45111, &date_format)
                    .unwrap();
            }
            Some("") => {}
            Some(text) => {
                codes.write_string(row, 2, *text).unwrap();
            }
        }
        codes.write_string(row, 3, "Y").unwrap();
    }

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "Topic").unwrap();
    notes.write_string(1, 0, "Dates").unwrap();

    workbook.save(path).unwrap();
}

fn render_output(path: &Path) -> String {
    let mut reader: Xlsx<_> = open_workbook(path).unwrap();
    let mut lines = Vec::new();
    for name in reader.sheet_names() {
        lines.push(format!("## {name}"));
        let range = reader.worksheet_range(&name).unwrap();
        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Data::Empty => "-".to_string(),
                    Data::String(text) => text.clone(),
                    other => format!("{other:?}"),
                })
                .collect();
            lines.push(cells.join(" | "));
        }
    }
    lines.join("\n")
}

#[test]
fn normalizes_workbook_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("A-SPEC.xlsx");
    write_input(&input);

    let options = load_options(None).unwrap();
    let workbook = ingest(&input).unwrap();
    let normalized = normalize(&workbook, &options).unwrap();
    let target = default_output_path(&input);
    output(&target, &normalized.workbook).unwrap();

    assert_eq!(target, dir.path().join("A-SPEC-normalized.xlsx"));
    assert_eq!(normalized.unresolved_count(), 1);
    insta::assert_snapshot!(render_output(&target), @r"
    ## Codes
    Codelist_Name | Code_Value | Date_Modified | Spec_Coverage
    SEX | M | 2023-07-04 | Y
    SEX | F | 2019-05-31 | Y
    RACE | 1 | 2022-03-01 | Y
    RACE | 2 | 2022-03-01 | Y
    RACE | 3 | - | Y
    UNIT | kg | 2023-07-04 | Y
    ## Notes
    Topic
    Dates
    ");
}

#[test]
fn config_file_overrides_sentinel_and_column() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("codes.xlsx");
    write_input(&input);
    let config = dir.path().join("rules.json");
    std::fs::write(
        &config,
        r#"{
            "rename": {
                "exact": { "Date Added or Modified": "Changed_On" },
                "substring": null
            },
            "date_column": "Changed_On",
            "date_policy": { "sentinel": "2000-01-01" }
        }"#,
    )
    .unwrap();

    let options = load_options(Some(&config)).unwrap();
    let workbook = ingest(&input).unwrap();
    let normalized = normalize(&workbook, &options).unwrap();
    let codes = normalized.workbook.sheet("Codes").unwrap();

    assert_eq!(
        codes.headers(),
        vec![
            "CODELIST",
            "Code",
            "Changed_On",
            "Codes involved in both DDS and ABC"
        ]
    );
    assert_eq!(
        codes.columns()[2].cells[1],
        aspec_model::Cell::from("2000-01-01")
    );
}

#[test]
fn missing_input_reports_path() {
    let dir = TempDir::new().unwrap();
    let error = ingest(&dir.path().join("absent.xlsx")).unwrap_err();
    assert!(format!("{error:#}").contains("absent.xlsx"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("rules.json");
    std::fs::write(&config, "{ not json").unwrap();
    let error = load_options(Some(&config)).unwrap_err();
    assert!(format!("{error:#}").contains("rules.json"));
}
