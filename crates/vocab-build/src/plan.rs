//! Plan the value-set workbooks for one source sheet.
//!
//! Planning reads the sheet only. [`crate::builder`] commits a plan to a
//! store.

use tracing::{debug, info};

use vocab_model::{
    CONCEPT_COLUMNS, ContentType, DRUG_COLUMNS, Diagnostics, SUBSET_COLUMNS, ValidationIssue,
    ValueSetKind, ValueSetSheets, keys,
};
use vocab_sheets::Sheet;

use crate::codes::{CodePair, has_wildcard};
use crate::config::{BuilderConfig, CodingSystem, Destinations, SystemRule};
use crate::error::{BuildError, Result};
use crate::extract::{extract_code_pairs, locate_system, sheet_headers};
use crate::metadata::{FILENAME_KEY, Metadata, extract_metadata};

/// Folder a created workbook is moved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    ValueSets,
    Intensional,
    Groupings,
}

impl Destination {
    pub fn folder(self, destinations: &Destinations) -> &str {
        match self {
            Self::ValueSets => &destinations.value_sets,
            Self::Intensional => &destinations.intensional,
            Self::Groupings => &destinations.groupings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedValueSet {
    pub filename: String,
    pub label: String,
    pub kind: ValueSetKind,
    /// Key of the coding system, `None` for the grouping set.
    pub system: Option<String>,
    pub sheets: ValueSetSheets,
    pub destination: Destination,
}

/// Everything to create for one source sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    pub sheet: String,
    /// One value set per coding system found, in configuration order.
    pub members: Vec<PlannedValueSet>,
    /// References every member; absent when no member was planned.
    pub grouping: Option<PlannedValueSet>,
    pub diagnostics: Diagnostics,
}

impl SheetPlan {
    /// Members followed by the grouping set.
    pub fn value_sets(&self) -> impl Iterator<Item = &PlannedValueSet> {
        self.members.iter().chain(self.grouping.iter())
    }
}

pub fn plan_sheet(sheet: &Sheet, config: &BuilderConfig) -> Result<SheetPlan> {
    let metadata = extract_metadata(sheet, config.header_rows, config.metadata_row_cap);
    for key in [FILENAME_KEY, keys::LABEL] {
        if metadata.get(key).is_none_or(str::is_empty) {
            return Err(BuildError::MissingMetadata {
                sheet: sheet.name().to_string(),
                key: key.to_string(),
            });
        }
    }

    let headers = sheet_headers(sheet, config.header_row());
    let mut diagnostics = Diagnostics::default();
    let mut members = Vec::new();
    for system in &config.systems {
        let Some(columns) = locate_system(sheet, &headers, system, &mut diagnostics) else {
            continue;
        };
        let pairs = extract_code_pairs(sheet, columns, config.header_rows);
        if let Some(planned) = plan_system(&metadata, system, &pairs) {
            debug!(system = %system.key, pairs = pairs.len(), kind = %planned.kind, "value set planned");
            members.push(planned);
        }
    }

    let grouping = if members.is_empty() {
        diagnostics.push(
            ValidationIssue::warning(
                "BD004",
                "No coding system with codes found; no value sets built",
            )
            .in_sheet(sheet.name()),
        );
        None
    } else {
        Some(plan_grouping(&metadata, &members))
    };
    info!(sheet = sheet.name(), value_sets = members.len(), "sheet planned");
    Ok(SheetPlan {
        sheet: sheet.name().to_string(),
        members,
        grouping,
        diagnostics,
    })
}

fn plan_system(
    metadata: &Metadata,
    system: &CodingSystem,
    pairs: &[CodePair],
) -> Option<PlannedValueSet> {
    if pairs.is_empty() {
        return None;
    }
    let mut kind = ValueSetKind::Extensional;
    let mut destination = Destination::ValueSets;
    let mut intent = None;
    let content = match system.rule {
        SystemRule::RequireCodes if pairs.iter().all(|pair| pair.code.is_empty()) => {
            return None;
        }
        SystemRule::GenericNames => drug_name_rows(pairs),
        SystemRule::WildcardIntent if pairs.iter().any(|pair| has_wildcard(&pair.code)) => {
            kind = ValueSetKind::Intensional;
            destination = Destination::Intensional;
            intent = Some(intent_for(&system.system, pairs));
            vec![header_row(system.content_type)]
        }
        _ => concept_rows(system, pairs),
    };

    let mut metadata = metadata.clone();
    let filename = format!("{}{}", metadata.filename().unwrap_or_default(), system.suffix);
    let label = format!("{}{}", metadata.label().unwrap_or_default(), system.suffix);
    metadata.set(FILENAME_KEY, filename.as_str());
    metadata.set(keys::LABEL, label.as_str());
    metadata.set(keys::CONTENT_TYPE, system.content_type.as_str());
    if let Some(intent) = intent {
        metadata.set(keys::INTENT, intent);
    }

    Some(PlannedValueSet {
        sheets: ValueSetSheets {
            title: filename.clone(),
            content_type: system.content_type,
            description: metadata.description_rows(),
            content,
        },
        filename,
        label,
        kind,
        system: Some(system.key.clone()),
        destination,
    })
}

fn plan_grouping(metadata: &Metadata, members: &[PlannedValueSet]) -> PlannedValueSet {
    let mut metadata = metadata.clone();
    metadata.set(keys::CONTENT_TYPE, ContentType::Subsets.as_str());
    let mut content = vec![header_row(ContentType::Subsets)];
    content.extend(
        members
            .iter()
            .map(|member| vec![member.filename.clone(), member.label.clone(), String::new()]),
    );
    let filename = metadata.filename().unwrap_or_default().to_string();
    PlannedValueSet {
        sheets: ValueSetSheets {
            title: filename.clone(),
            content_type: ContentType::Subsets,
            description: metadata.description_rows(),
            content,
        },
        label: metadata.label().unwrap_or_default().to_string(),
        filename,
        kind: ValueSetKind::Grouping,
        system: None,
        destination: Destination::Groupings,
    }
}

fn header_row(content_type: ContentType) -> Vec<String> {
    let columns: &[&str] = match content_type {
        ContentType::Concepts => &CONCEPT_COLUMNS,
        ContentType::Drugs => &DRUG_COLUMNS,
        ContentType::Subsets => &SUBSET_COLUMNS,
    };
    columns.iter().map(|column| (*column).to_string()).collect()
}

/// `<system>: code, code, ...` over every non-empty code.
fn intent_for(system: &str, pairs: &[CodePair]) -> String {
    let codes: Vec<&str> = pairs
        .iter()
        .map(|pair| pair.code.as_str())
        .filter(|code| !code.is_empty())
        .collect();
    format!("{system}: {}", codes.join(", "))
}

fn concept_rows(system: &CodingSystem, pairs: &[CodePair]) -> Vec<Vec<String>> {
    let width = header_row(system.content_type).len();
    let mut rows = vec![header_row(system.content_type)];
    rows.extend(pairs.iter().map(|pair| {
        let mut row = vec![pair.label.clone(), pair.code.clone(), system.system.clone()];
        row.resize(width, String::new());
        row
    }));
    rows
}

/// The code column holds the generic name and the label column its
/// category.
fn drug_name_rows(pairs: &[CodePair]) -> Vec<Vec<String>> {
    let mut rows = vec![header_row(ContentType::Drugs)];
    rows.extend(pairs.iter().filter(|pair| !pair.code.is_empty()).map(|pair| {
        vec![
            pair.code.clone(),
            String::new(),
            String::new(),
            String::new(),
            pair.code.clone(),
            String::new(),
            pair.label.clone(),
        ]
    }));
    rows
}
