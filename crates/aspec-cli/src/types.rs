use std::path::PathBuf;

use aspec_transform::SheetReport;

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub date_column: String,
    pub sheets: Vec<SheetReport>,
}

impl RunResult {
    pub fn unresolved_count(&self) -> usize {
        self.sheets.iter().map(SheetReport::unresolved).sum()
    }
}
