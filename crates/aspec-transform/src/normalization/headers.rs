//! Header renaming.

use aspec_model::RenameTable;

/// A header whose name changed during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChange {
    pub index: usize,
    pub from: String,
    pub to: String,
}

/// Apply the rename table to a sheet's headers.
///
/// Exact matches are replaced first. Of the headers that were not renamed
/// exactly, the first one containing the substring marker gets the substring
/// target; later matches are left alone, and nothing is renamed when a header
/// already carries the target name. Order and count never change.
pub fn normalize_headers<S: AsRef<str>>(headers: &[S], table: &RenameTable) -> Vec<String> {
    let mut exact_hit = vec![false; headers.len()];
    let mut normalized: Vec<String> = headers
        .iter()
        .zip(exact_hit.iter_mut())
        .map(|(header, hit)| {
            let header: &str = header.as_ref();
            match table.lookup(header) {
                Some(target) => {
                    *hit = true;
                    target.to_string()
                }
                None => header.to_string(),
            }
        })
        .collect();

    if let Some(rule) = &table.substring
        && !normalized.contains(&rule.target)
    {
        let first = normalized
            .iter()
            .zip(&exact_hit)
            .position(|(name, hit)| !hit && name.contains(rule.marker.as_str()));
        if let Some(index) = first {
            normalized[index] = rule.target.clone();
        }
    }
    normalized
}

/// Headers that differ between `before` and `after`, by position.
pub fn header_changes<S: AsRef<str>>(before: &[S], after: &[String]) -> Vec<HeaderChange> {
    let mut changes = Vec::new();
    for (index, (from, to)) in before.iter().zip(after).enumerate() {
        let from: &str = from.as_ref();
        if from != to.as_str() {
            changes.push(HeaderChange {
                index,
                from: from.to_string(),
                to: to.clone(),
            });
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_substring_renames() {
        let headers = [
            "CODELIST",
            "Code",
            "Description",
            "Date Added or Modified",
            "Codes involved in both DDS and XYZ",
        ];
        let normalized = normalize_headers(&headers, &RenameTable::default());
        assert_eq!(
            normalized,
            vec![
                "Codelist_Name",
                "Code_Value",
                "Description",
                "Date_Modified",
                "Spec_Coverage"
            ]
        );
    }

    #[test]
    fn substring_renames_only_first_match() {
        let headers = [
            "Codes involved in both DDS (v1)",
            "Codes involved in both DDS (v2)",
        ];
        let normalized = normalize_headers(&headers, &RenameTable::default());
        assert_eq!(
            normalized,
            vec!["Spec_Coverage", "Codes involved in both DDS (v2)"]
        );
    }

    #[test]
    fn substring_skipped_when_target_present() {
        let headers = ["Spec_Coverage", "Codes involved in both DDS"];
        let normalized = normalize_headers(&headers, &RenameTable::default());
        assert_eq!(normalized, vec!["Spec_Coverage", "Codes involved in both DDS"]);
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let headers = ["codelist", "CODE"];
        let normalized = normalize_headers(&headers, &RenameTable::default());
        assert_eq!(normalized, vec!["codelist", "CODE"]);
    }

    #[test]
    fn changes_are_reported_by_position() {
        let before = ["Code", "Notes"];
        let after = normalize_headers(&before, &RenameTable::default());
        assert_eq!(
            header_changes(&before, &after),
            vec![HeaderChange {
                index: 0,
                from: "Code".to_string(),
                to: "Code_Value".to_string(),
            }]
        );
    }
}
