//! Pipeline stages for the normalize command.
//!
//! Each stage wraps one library crate and attaches context to its errors:
//! load options, ingest, normalize, output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use aspec_ingest::read_workbook;
use aspec_model::{NormalizeOptions, Workbook};
use aspec_output::write_workbook;
use aspec_transform::{NormalizedWorkbook, normalize_workbook};

/// Suffix appended to the input file stem for the default output path.
pub const OUTPUT_SUFFIX: &str = "-normalized";

/// Default output path: `<input stem>-normalized.xlsx` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.xlsx"))
}

/// Loads options from a JSON config file, or the built-in defaults.
pub fn load_options(config: Option<&Path>) -> Result<NormalizeOptions> {
    match config {
        Some(path) => NormalizeOptions::from_json_file(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(NormalizeOptions::default()),
    }
}

/// Reads every sheet of the input workbook.
pub fn ingest(input: &Path) -> Result<Workbook> {
    let span = info_span!("ingest", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let workbook = read_workbook(input).with_context(|| format!("read {}", input.display()))?;
    info!(
        sheet_count = workbook.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(workbook)
}

/// Renames headers and resolves dates on every sheet.
pub fn normalize(workbook: &Workbook, options: &NormalizeOptions) -> Result<NormalizedWorkbook> {
    let span = info_span!("normalize", date_column = %options.date_column);
    let _guard = span.enter();
    let start = Instant::now();
    options.validate().context("invalid normalize options")?;
    let normalized = normalize_workbook(workbook, options).context("normalize workbook")?;
    info!(
        sheet_count = normalized.reports.len(),
        unresolved = normalized.unresolved_count(),
        duration_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(normalized)
}

/// Writes the normalized workbook in a single write.
pub fn output(path: &Path, workbook: &Workbook) -> Result<()> {
    let span = info_span!("output", output = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    write_workbook(path, workbook).with_context(|| format!("write {}", path.display()))?;
    info!(
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_beside_input() {
        assert_eq!(
            default_output_path(Path::new("data/A-SPEC codelists.xlsx")),
            PathBuf::from("data/A-SPEC codelists-normalized.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("codes.xls")),
            PathBuf::from("codes-normalized.xlsx")
        );
    }

    #[test]
    fn missing_config_uses_defaults() {
        assert_eq!(load_options(None).unwrap(), NormalizeOptions::default());
    }
}
