use std::collections::BTreeMap;

/// One content row keyed by its header.
pub type Record = BTreeMap<String, String>;

/// Zip every row after the first with the header row.
///
/// Cells missing from a short row read as `""`; a repeated header keeps the
/// value of its last column. Grids with one row or fewer yield nothing.
pub fn values_to_records(values: &[Vec<String>]) -> Vec<Record> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(idx, key)| (key.clone(), row.get(idx).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Value of `key` in a record, or `""`.
pub(crate) fn field(record: &Record, key: &str) -> String {
    record.get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(values_to_records(&[]).is_empty());
        assert!(values_to_records(&[strings(&["Label", "Code"])]).is_empty());
    }

    #[test]
    fn zips_rows_with_header() {
        let values = vec![
            strings(&["Label", "Code", "System"]),
            strings(&["Cholera", "A00", "ICD-10"]),
            strings(&["Typhoid", "A01"]),
        ];
        let records = values_to_records(&values);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Code"], "A00");
        assert_eq!(records[1]["System"], "");
        assert_eq!(field(&records[1], "Note"), "");
    }
}
