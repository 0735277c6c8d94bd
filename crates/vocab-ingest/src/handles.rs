use std::collections::BTreeMap;

use vocab_model::{Diagnostics, ValidationIssue, ValueSet};

/// Report handles shared by more than one value set.
pub fn check_duplicate_handles(value_sets: &[ValueSet]) -> Diagnostics {
    let mut by_handle: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for value_set in value_sets {
        if value_set.handle.is_empty() {
            continue;
        }
        by_handle
            .entry(value_set.handle.as_str())
            .or_default()
            .push(value_set.info.short_name.as_str());
    }
    let mut diagnostics = Diagnostics::default();
    for (handle, files) in by_handle {
        if files.len() > 1 {
            diagnostics.push(
                ValidationIssue::warning(
                    "VS010",
                    format!("Duplicate handle {handle} in: {}", files.join(", ")),
                )
                .with_count(files.len() as u64),
            );
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_set(handle: &str, short_name: &str) -> ValueSet {
        let mut value_set = ValueSet::new();
        value_set.handle = handle.to_string();
        value_set.info.short_name = short_name.to_string();
        value_set
    }

    #[test]
    fn reports_each_shared_handle_once() {
        let sets = vec![
            value_set("covid_dx", "covid_Dx (ICD-10)"),
            value_set("covid_dx", "covid_Dx (SNOMED)"),
            value_set("covid_tx", "covid_Tx"),
            value_set("", "untitled"),
            value_set("", "untitled 2"),
        ];
        let diagnostics = check_duplicate_handles(&sets);
        assert_eq!(diagnostics.issues.len(), 1);
        let issue = &diagnostics.issues[0];
        assert_eq!(issue.count, Some(2));
        assert_eq!(
            issue.message,
            "Duplicate handle covid_dx in: covid_Dx (ICD-10), covid_Dx (SNOMED)"
        );
    }
}
