use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use aspec_cli::pipeline::{default_output_path, ingest, load_options, normalize, output};
use aspec_model::NormalizeOptions;
use aspec_transform::format_iso8601_date;

use crate::cli::{NormalizeArgs, RulesArgs};
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let options = load_options(args.config.as_deref())?;
    if args.json {
        let json = serde_json::to_string_pretty(&options).context("serialize rules")?;
        println!("{json}");
        return Ok(());
    }
    println!("{}", rename_table(&options));
    println!("Date column: {}", options.date_column);
    println!(
        "Sentinel date: {}",
        format_iso8601_date(options.date_policy.sentinel)
    );
    let markers: Vec<String> = options
        .date_policy
        .missing_markers
        .iter()
        .map(|marker| format!("{marker:?}"))
        .collect();
    println!("Missing markers: {}", markers.join(", "));
    Ok(())
}

fn rename_table(options: &NormalizeOptions) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Match", "Header", "Renamed to"]);
    apply_table_style(&mut table);
    for (from, to) in &options.rename.exact {
        table.add_row(vec!["exact", from.as_str(), to.as_str()]);
    }
    if let Some(rule) = &options.rename.substring {
        table.add_row(vec![
            "contains",
            rule.marker.as_str(),
            rule.target.as_str(),
        ]);
    }
    table
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<RunResult> {
    let input = &args.input;
    let run_span = info_span!("normalize_run", input = %input.display());
    let _run_guard = run_span.enter();

    // =========================================================================
    // Stage 0: Options
    // =========================================================================
    let options = load_options(args.config.as_deref())?;

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let workbook = ingest(input)?;

    // =========================================================================
    // Stage 2: Normalize headers and dates
    // =========================================================================
    let normalized = normalize(&workbook, &options)?;

    // =========================================================================
    // Stage 3: Output
    // =========================================================================
    let output_path = if args.dry_run {
        info!("dry run, skipping output");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(input));
        output(&path, &normalized.workbook)?;
        Some(path)
    };

    Ok(RunResult {
        input: input.clone(),
        output: output_path,
        date_column: options.date_column,
        sheets: normalized.reports,
    })
}
