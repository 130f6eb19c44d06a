use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use aspec_transform::SheetReport;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    println!("{}", summary_table(result));
    print_unresolved_table(result);
}

pub fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Renamed"),
        header_cell(&result.date_column),
        header_cell("Parsed"),
        header_cell("Defaulted"),
        header_cell("Unresolved"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);

    let mut total_rows = 0usize;
    let mut total_renamed = 0usize;
    let mut total_parsed = 0usize;
    let mut total_defaulted = 0usize;
    let mut total_unresolved = 0usize;
    for sheet in &result.sheets {
        total_rows += sheet.rows;
        total_renamed += sheet.renamed.len();
        total_parsed += sheet.parsed();
        total_defaulted += sheet.defaulted();
        total_unresolved += sheet.unresolved();
        table.add_row(sheet_row(sheet));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_renamed).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_parsed).add_attribute(Attribute::Bold),
        Cell::new(total_defaulted).add_attribute(Attribute::Bold),
        count_cell(total_unresolved, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn sheet_row(sheet: &SheetReport) -> Vec<Cell> {
    let (present, parsed, defaulted, unresolved) = if sheet.has_date_column() {
        (
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.parsed()),
            Cell::new(sheet.defaulted()),
            count_cell(sheet.unresolved(), Color::Yellow),
        )
    } else {
        (dim_cell("-"), dim_cell("-"), dim_cell("-"), dim_cell("-"))
    };
    vec![
        Cell::new(&sheet.sheet)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(sheet.rows),
        Cell::new(sheet.renamed.len()),
        present,
        parsed,
        defaulted,
        unresolved,
    ]
}

/// Lists the spreadsheet rows whose date could not be resolved.
fn print_unresolved_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Sheet"), header_cell("Rows")]);
    apply_table_style(&mut table);
    for sheet in &result.sheets {
        let rows: Vec<String> = sheet
            .date_columns
            .iter()
            .flat_map(|column| column.unresolved_rows.iter())
            .map(ToString::to_string)
            .collect();
        if !rows.is_empty() {
            table.add_row(vec![Cell::new(&sheet.sheet), Cell::new(rows.join(", "))]);
        }
    }
    if table.row_count() == 0 {
        return;
    }
    println!();
    println!("Unresolved dates (left blank):");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
