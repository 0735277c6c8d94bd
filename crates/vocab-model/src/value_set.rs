//! Value sets and their members.
//!
//! A value-set workbook has two sheets:
//!
//! - **Description**: ordered `key | value` rows (see [`keys`]); list-valued
//!   keys such as `Reference` and `Note` repeat.
//! - **Content**: a header row plus one row per member. The sheet is named by
//!   the [`ContentType`] and uses [`CONCEPT_COLUMNS`], [`DRUG_COLUMNS`] or
//!   [`SUBSET_COLUMNS`].
//!
//! [`ValueSet::description_rows`] and [`ValueSet::content_rows`] render the
//! model back into those rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::ValidationIssue;
use crate::enums::{ContentType, ValueSetKind};

pub const DESCRIPTION_SHEET: &str = "Description";

pub const CONCEPT_COLUMNS: [&str; 4] = ["Label", "Code", "System", "Note"];
pub const DRUG_COLUMNS: [&str; 7] = [
    "Label",
    "Code",
    "System",
    "Note",
    "Generic Name",
    "Trade Name",
    "Category",
];
pub const SUBSET_COLUMNS: [&str; 3] = ["Filename", "Value Set Label", "Note"];

pub const TERM_CONTEXT_GENERIC_NAME: &str = "drug-generic-name";
pub const TERM_CONTEXT_TRADE_NAME: &str = "drug-trade-name";

/// Keys recognised in the Description sheet.
pub mod keys {
    pub const HANDLE: &str = "Handle";
    pub const LABEL: &str = "Label";
    pub const VALUE_SET_TYPE: &str = "Value Set Type";
    pub const CONTENT_TYPE: &str = "Content Type";
    pub const DESCRIPTION: &str = "Description";
    pub const OID: &str = "OID";
    pub const URL: &str = "URL";
    pub const CONCEPT: &str = "Concept";
    pub const INTENT: &str = "Intent";
    pub const REFERENCE: &str = "Reference";
    pub const NOTE: &str = "Note";
    pub const INFO_DETAILS_JSON: &str = "Info-details-json";
    pub const INFO_DETAILS_TEXT: &str = "Info-details-text";
}

/// A synonym of a concept with its usage context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub label: String,
    /// Context tag (e.g., "drug-generic-name").
    pub context: String,
}

impl Term {
    pub fn new(label: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            context: context.into(),
        }
    }
}

/// One coded clinical term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub handle: String,
    pub label: String,
    pub code: String,
    /// Coding system (e.g., "ICD-10", "SNOMED").
    pub system: String,
    pub note: String,
    /// Drug category, only used by drug lists.
    pub category: String,
    pub terms: Vec<Term>,
}

impl Concept {
    pub fn new(
        label: impl Into<String>,
        code: impl Into<String>,
        system: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
            system: system.into(),
            ..Self::default()
        }
    }

    pub fn generic_name(&self) -> Option<&str> {
        self.terms
            .iter()
            .find(|term| term.context == TERM_CONTEXT_GENERIC_NAME)
            .map(|term| term.label.as_str())
    }

    pub fn trade_names(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(|term| term.context == TERM_CONTEXT_TRADE_NAME)
            .map(|term| term.label.as_str())
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.system, self.code, self.label)
    }
}

/// Pointer from a grouping value set to one of its member value sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VsReference {
    pub label: String,
    /// Filename of the referenced value set.
    pub short_name: String,
    pub note: String,
}

impl VsReference {
    pub fn new(
        label: impl Into<String>,
        short_name: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            short_name: short_name.into(),
            note: note.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    pub references: Vec<String>,
    pub notes: Vec<String>,
}

/// Free-form detail attached to a value set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum InfoDetail {
    Json(serde_json::Value),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSetInfo {
    /// Name of the workbook the value set was read from.
    pub short_name: String,
    pub details: Vec<InfoDetail>,
    /// Processing flags (e.g., "drug-list").
    pub flags: Vec<String>,
}

/// A terminology value set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueSet {
    pub label: String,
    pub handle: String,
    pub kind: Option<ValueSetKind>,
    pub content_type: Option<ContentType>,
    pub concept: String,
    pub description: String,
    pub oid: String,
    pub uri: String,
    pub namespaces: Vec<String>,
    pub intent: String,
    pub members: Vec<Concept>,
    pub subsets: Vec<VsReference>,
    pub documentation: Documentation,
    pub info: ValueSetInfo,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content type used when writing the value set out.
    ///
    /// Falls back to subsets for grouping sets and concepts otherwise.
    pub fn effective_content_type(&self) -> ContentType {
        match (self.content_type, self.kind) {
            (Some(content_type), _) => content_type,
            (None, Some(ValueSetKind::Grouping)) => ContentType::Subsets,
            (None, _) => ContentType::Concepts,
        }
    }

    /// Rows of the Description sheet.
    pub fn description_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        push_pair(&mut rows, keys::LABEL, &self.label);
        push_pair(&mut rows, keys::HANDLE, &self.handle);
        if let Some(kind) = self.kind {
            push_pair(&mut rows, keys::VALUE_SET_TYPE, kind.as_str());
        }
        if self.kind.is_some() || self.content_type.is_some() {
            push_pair(
                &mut rows,
                keys::CONTENT_TYPE,
                self.effective_content_type().as_str(),
            );
        }
        push_pair(&mut rows, keys::CONCEPT, &self.concept);
        push_pair(&mut rows, keys::DESCRIPTION, &self.description);
        push_pair(&mut rows, keys::OID, &self.oid);
        push_pair(&mut rows, keys::URL, &self.uri);
        push_pair(&mut rows, keys::INTENT, &self.intent);
        for reference in &self.documentation.references {
            push_pair(&mut rows, keys::REFERENCE, reference);
        }
        for note in &self.documentation.notes {
            push_pair(&mut rows, keys::NOTE, note);
        }
        for detail in &self.info.details {
            match detail {
                InfoDetail::Json(value) => {
                    push_pair(&mut rows, keys::INFO_DETAILS_JSON, &value.to_string());
                }
                InfoDetail::Text(text) => push_pair(&mut rows, keys::INFO_DETAILS_TEXT, text),
            }
        }
        rows
    }

    /// Rows of the content sheet, header first.
    pub fn content_rows(&self) -> Vec<Vec<String>> {
        match self.effective_content_type() {
            ContentType::Subsets => {
                let mut rows = vec![header(&SUBSET_COLUMNS)];
                rows.extend(self.subsets.iter().map(|subset| {
                    vec![
                        subset.short_name.clone(),
                        subset.label.clone(),
                        subset.note.clone(),
                    ]
                }));
                rows
            }
            ContentType::Drugs => {
                let mut rows = vec![header(&DRUG_COLUMNS)];
                rows.extend(self.members.iter().map(|concept| {
                    vec![
                        concept.label.clone(),
                        concept.code.clone(),
                        concept.system.clone(),
                        concept.note.clone(),
                        concept.generic_name().unwrap_or_default().to_string(),
                        concept.trade_names().collect::<Vec<_>>().join(", "),
                        concept.category.clone(),
                    ]
                }));
                rows
            }
            ContentType::Concepts => {
                let mut rows = vec![header(&CONCEPT_COLUMNS)];
                rows.extend(self.members.iter().map(|concept| {
                    vec![
                        concept.label.clone(),
                        concept.code.clone(),
                        concept.system.clone(),
                        concept.note.clone(),
                    ]
                }));
                rows
            }
        }
    }

    /// Both sheets of the workbook that stores this value set.
    pub fn to_sheets(&self, title: impl Into<String>) -> ValueSetSheets {
        ValueSetSheets {
            title: title.into(),
            content_type: self.effective_content_type(),
            description: self.description_rows(),
            content: self.content_rows(),
        }
    }

    /// Check that members or subsets are populated as the kind requires.
    pub fn membership_issues(&self) -> Vec<ValidationIssue> {
        let name = if self.handle.is_empty() {
            self.info.short_name.as_str()
        } else {
            self.handle.as_str()
        };
        let mut issues = Vec::new();
        match self.kind {
            Some(ValueSetKind::Grouping) => {
                if !self.members.is_empty() {
                    issues.push(ValidationIssue::warning(
                        "VS020",
                        format!("Grouping value set {name} lists concepts"),
                    ));
                }
                if self.subsets.is_empty() {
                    issues.push(ValidationIssue::warning(
                        "VS021",
                        format!("Grouping value set {name} has no subsets"),
                    ));
                }
            }
            Some(kind) => {
                if !self.subsets.is_empty() {
                    issues.push(ValidationIssue::warning(
                        "VS022",
                        format!("{kind} value set {name} lists subsets"),
                    ));
                }
                if kind == ValueSetKind::Extensional && self.members.is_empty() {
                    issues.push(ValidationIssue::warning(
                        "VS023",
                        format!("Extensional value set {name} has no members"),
                    ));
                }
            }
            None => {}
        }
        issues
    }
}

/// Rendered sheets of a value-set workbook, ready to be written to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSetSheets {
    pub title: String,
    pub content_type: ContentType,
    pub description: Vec<Vec<String>>,
    pub content: Vec<Vec<String>>,
}

impl ValueSetSheets {
    pub fn content_sheet(&self) -> &'static str {
        self.content_type.sheet_name()
    }
}

fn push_pair(rows: &mut Vec<Vec<String>>, key: &str, value: &str) {
    if !value.is_empty() {
        rows.push(vec![key.to_string(), value.to_string()]);
    }
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|column| (*column).to_string()).collect()
}
