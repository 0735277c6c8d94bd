use tracing::debug;

use vocab_model::keys;
use vocab_sheets::Sheet;

pub const FILENAME_KEY: &str = "Filename";

const VALUE_SET_TYPES: [(&str, &str); 3] = [
    ("Px", "Procedure"),
    ("Dx", "Diagnosis"),
    ("Tx", "Treatment"),
];

/// Ordered label/value pairs from a source sheet's metadata block.
///
/// Setting an existing label replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(label, _)| label == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(label, _)| *label == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn filename(&self) -> Option<&str> {
        self.get(FILENAME_KEY)
    }

    pub fn label(&self) -> Option<&str> {
        self.get(keys::LABEL)
    }

    /// Description rows for the value-set workbook. The filename becomes the
    /// workbook title and is left out.
    pub fn description_rows(&self) -> Vec<Vec<String>> {
        self.entries
            .iter()
            .filter(|(label, _)| label != FILENAME_KEY)
            .map(|(label, value)| vec![label.clone(), value.clone()])
            .collect()
    }
}

/// Read the metadata block and add the `Value Set Type` implied by the
/// filename suffix.
///
/// Rows from `header_rows` down to `row_cap` (or the end of the sheet) with
/// a non-empty label in column 0 contribute `label -> column 1`.
pub fn extract_metadata(sheet: &Sheet, header_rows: usize, row_cap: Option<usize>) -> Metadata {
    let end = row_cap.map_or(sheet.rows(), |cap| cap.min(sheet.rows()));
    let mut metadata = Metadata::default();
    for row in header_rows..end {
        let label = sheet.cell(row, 0).unwrap_or_default().trim();
        if label.is_empty() {
            continue;
        }
        metadata.set(label, sheet.cell(row, 1).unwrap_or_default());
    }
    if let Some(kind) = metadata.filename().and_then(value_set_type_for_filename) {
        metadata.set(keys::VALUE_SET_TYPE, kind);
    }
    debug!(sheet = sheet.name(), entries = metadata.entries.len(), "metadata read");
    metadata
}

/// Procedure, Diagnosis or Treatment for filenames ending in Px, Dx or Tx.
pub fn value_set_type_for_filename(filename: &str) -> Option<&'static str> {
    VALUE_SET_TYPES
        .iter()
        .find(|(suffix, _)| filename.ends_with(suffix))
        .map(|(_, kind)| *kind)
}
