//! Configuration for workbook normalization.
//!
//! Every value the pipeline needs is carried explicitly in
//! [`NormalizeOptions`]; the defaults reproduce the fixed A-SPEC codelist
//! conventions and can be overridden from a JSON config file.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Header that receives the standardized dates.
pub const DEFAULT_DATE_COLUMN: &str = "Date_Modified";

/// Marker phrase identifying the DDS coverage column.
pub const SPEC_COVERAGE_MARKER: &str = "Codes involved in both DDS";

/// Name given to the column matched by [`SPEC_COVERAGE_MARKER`].
pub const SPEC_COVERAGE_HEADER: &str = "Spec_Coverage";

/// Date substituted for blank or missing date cells.
pub const DEFAULT_SENTINEL_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2019, 5, 31) {
    Some(date) => date,
    None => panic!("invalid sentinel date"),
};

/// Exact source -> target header renames.
pub const DEFAULT_EXACT_RENAMES: [(&str, &str); 3] = [
    ("CODELIST", "Codelist_Name"),
    ("Code", "Code_Value"),
    ("Date Added or Modified", DEFAULT_DATE_COLUMN),
];

/// Text values treated as "no value" in the date column, compared after
/// trimming and case-sensitively.
pub const DEFAULT_MISSING_MARKERS: [&str; 14] = [
    "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None",
    "n/a", "nan", "null",
];

/// Rename applied to the first header containing `marker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstringRename {
    pub marker: String,
    pub target: String,
}

/// Header rename rules applied to every sheet independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameTable {
    /// Exact header text -> replacement.
    pub exact: BTreeMap<String, String>,
    /// Optional substring rule, applied to at most one header per sheet.
    pub substring: Option<SubstringRename>,
}

impl Default for RenameTable {
    fn default() -> Self {
        Self {
            exact: DEFAULT_EXACT_RENAMES
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
            substring: Some(SubstringRename {
                marker: SPEC_COVERAGE_MARKER.to_string(),
                target: SPEC_COVERAGE_HEADER.to_string(),
            }),
        }
    }
}

impl RenameTable {
    /// A table with no rules; every header passes through.
    pub fn empty() -> Self {
        Self {
            exact: BTreeMap::new(),
            substring: None,
        }
    }

    #[must_use]
    pub fn with_exact(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.exact.insert(from.into(), to.into());
        self
    }

    #[must_use]
    pub fn with_substring(mut self, marker: impl Into<String>, target: impl Into<String>) -> Self {
        self.substring = Some(SubstringRename {
            marker: marker.into(),
            target: target.into(),
        });
        self
    }

    /// Target for an exact header match.
    pub fn lookup(&self, header: &str) -> Option<&str> {
        self.exact.get(header).map(String::as_str)
    }

    /// Rejects tables whose output would be renamed again on a second pass.
    pub fn validate(&self) -> Result<()> {
        for (from, to) in &self.exact {
            if from != to && self.exact.contains_key(to) {
                return Err(ModelError::InvalidRenameTable {
                    reason: format!("target '{to}' of '{from}' is also a source header"),
                });
            }
        }
        if let Some(rule) = &self.substring {
            if rule.marker.is_empty() {
                return Err(ModelError::InvalidRenameTable {
                    reason: "substring marker is empty".to_string(),
                });
            }
            if rule.target.contains(&rule.marker) || self.exact.contains_key(&rule.target) {
                return Err(ModelError::InvalidRenameTable {
                    reason: format!("substring target '{}' would be renamed again", rule.target),
                });
            }
            if let Some((from, to)) = self.exact.iter().find(|(_, to)| to.contains(&rule.marker)) {
                return Err(ModelError::InvalidRenameTable {
                    reason: format!("target '{to}' of '{from}' contains the substring marker"),
                });
            }
        }
        Ok(())
    }
}

/// Policy for dates that carry no information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePolicy {
    /// Date used for blank and missing cells.
    pub sentinel: NaiveDate,
    /// Text values treated the same as a blank cell.
    pub missing_markers: Vec<String>,
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL_DATE,
            missing_markers: DEFAULT_MISSING_MARKERS
                .iter()
                .map(|marker| (*marker).to_string())
                .collect(),
        }
    }
}

impl DatePolicy {
    /// Whether already-trimmed text is a missing marker.
    pub fn is_missing_marker(&self, trimmed: &str) -> bool {
        self.missing_markers.iter().any(|marker| marker == trimmed)
    }
}

/// Options for normalizing a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub rename: RenameTable,
    /// Normalized header whose cells are resolved to dates.
    pub date_column: String,
    pub date_policy: DatePolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            rename: RenameTable::default(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            date_policy: DatePolicy::default(),
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rename(mut self, rename: RenameTable) -> Self {
        self.rename = rename;
        self
    }

    #[must_use]
    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    #[must_use]
    pub fn with_sentinel(mut self, sentinel: NaiveDate) -> Self {
        self.date_policy.sentinel = sentinel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_column.trim().is_empty() {
            return Err(ModelError::InvalidOptions {
                reason: "date column name is empty".to_string(),
            });
        }
        self.rename.validate()
    }

    /// Loads options from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self =
            serde_json::from_str(&text).map_err(|source| ModelError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        options.validate()?;
        Ok(options)
    }
}
