//! Locate coding-system columns and pull their code pairs.

use tracing::{debug, warn};

use vocab_model::{Diagnostics, ValidationIssue};
use vocab_sheets::Sheet;

use crate::codes::{CodePair, clean_cell, dedupe_pairs, repair_scientific_notation};
use crate::config::{CodingSystem, ColumnPair};

/// Trimmed cells of the coding-system header row.
pub fn sheet_headers(sheet: &Sheet, header_row: usize) -> Vec<String> {
    sheet
        .row(header_row)
        .unwrap_or_default()
        .iter()
        .map(|header| header.trim().to_string())
        .collect()
}

/// Indexes of every header containing `needle`.
pub fn find_indices(headers: &[String], needle: &str) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.contains(needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Columns to read for `system`, or `None` when the sheet does not carry it.
///
/// The configured pair is used only when its code column's header matches.
/// Several matching headers, or a match elsewhere, are reported.
pub fn locate_system(
    sheet: &Sheet,
    headers: &[String],
    system: &CodingSystem,
    diagnostics: &mut Diagnostics,
) -> Option<ColumnPair> {
    let found = find_indices(headers, &system.header);
    if found.is_empty() {
        debug!(system = %system.key, "coding system not present");
        return None;
    }
    let configured = found.contains(&system.columns.code);
    if found.len() > 1 {
        warn!(sheet = sheet.name(), system = %system.key, columns = ?found, "ambiguous header");
        diagnostics.push(
            ValidationIssue::warning(
                "BD002",
                format!(
                    "Header '{}' matches columns {found:?}; using column {}",
                    system.header, system.columns.code
                ),
            )
            .in_sheet(sheet.name()),
        );
    }
    if !configured {
        warn!(sheet = sheet.name(), system = %system.key, columns = ?found, "header in unexpected column");
        diagnostics.push(
            ValidationIssue::warning(
                "BD003",
                format!(
                    "Header '{}' found in columns {found:?} but not in column {}; skipping {}",
                    system.header, system.columns.code, system.key
                ),
            )
            .in_sheet(sheet.name()),
        );
        return None;
    }
    Some(system.columns)
}

/// Cleaned, repaired and deduplicated pairs from the data rows.
pub fn extract_code_pairs(sheet: &Sheet, columns: ColumnPair, first_row: usize) -> Vec<CodePair> {
    let pairs = (first_row..sheet.rows())
        .map(|row| {
            let code = clean_cell(sheet.cell(row, columns.code).unwrap_or_default());
            let label = clean_cell(sheet.cell(row, columns.label).unwrap_or_default());
            CodePair::new(repair_scientific_notation(&code), label)
        })
        .filter(|pair| !pair.is_empty())
        .collect();
    dedupe_pairs(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn headers_are_trimmed() {
        let sheet = Sheet::from_values("tab", grid(&[&["title"], &["", " ICD10 code ", "desc"]]));
        assert_eq!(sheet_headers(&sheet, 1), vec!["", "ICD10 code", "desc"]);
        assert!(sheet_headers(&sheet, 5).is_empty());
    }

    #[test]
    fn find_indices_matches_substrings() {
        let headers = vec![
            "ICD10 code".to_string(),
            "Desc".to_string(),
            "ICD10 alt".to_string(),
        ];
        assert_eq!(find_indices(&headers, "ICD10"), vec![0, 2]);
        assert!(find_indices(&headers, "OPCS").is_empty());
    }

    #[test]
    fn pairs_skip_blank_rows() {
        let sheet = Sheet::from_values(
            "tab",
            grid(&[
                &["", ""],
                &["Code", "Label"],
                &["A00", "Cholera"],
                &["", ""],
                &["1E+05", "Big\ncode"],
                &["A00", "Cholera"],
            ]),
        );
        let pairs = extract_code_pairs(&sheet, ColumnPair { code: 0, label: 1 }, 2);
        assert_eq!(
            pairs,
            vec![
                CodePair::new("A00", "Cholera"),
                CodePair::new("100000", "Bigcode"),
            ]
        );
    }
}
