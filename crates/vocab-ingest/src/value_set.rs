//! Parse a value-set workbook into a [`ValueSet`].
//!
//! Problems never abort the parse; they are returned as diagnostics next to
//! whatever could be read.

use tracing::{debug, debug_span, warn};

use vocab_model::{
    Concept, ContentType, DESCRIPTION_SHEET, Diagnostics, InfoDetail, TERM_CONTEXT_GENERIC_NAME,
    TERM_CONTEXT_TRADE_NAME, Term, ValidationIssue, ValueSet, ValueSetKind, VsReference, keys,
};
use vocab_sheets::{Sheet, Workbook};

use crate::records::{Record, field, values_to_records};

pub const DRUG_LIST_FLAG: &str = "drug-list";

/// A parsed value set and the issues found while reading it.
#[derive(Debug, Clone, Default)]
pub struct ParsedValueSet {
    pub value_set: ValueSet,
    pub diagnostics: Diagnostics,
}

impl ParsedValueSet {
    pub fn is_ok(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Raw Description values that need the whole sheet before they can be
/// interpreted.
#[derive(Default)]
struct Declared {
    kind: String,
    content_type: String,
}

pub fn value_set_from_workbook(workbook: &Workbook) -> ParsedValueSet {
    let name = workbook.name();
    let span = debug_span!("value_set", workbook = name);
    let _guard = span.enter();

    let mut value_set = ValueSet::new();
    value_set.info.short_name = name.to_string();
    let mut diagnostics = Diagnostics::default();

    let Some(description) = workbook.sheet(DESCRIPTION_SHEET) else {
        diagnostics.push(
            ValidationIssue::error("VS001", format!("No description sheet in file: {name}"))
                .in_sheet(name),
        );
        return ParsedValueSet {
            value_set,
            diagnostics,
        };
    };

    let declared = read_description(description, &mut value_set, &mut diagnostics);

    let content_type = match declared.content_type.as_str() {
        "" => None,
        raw => match raw.parse::<ContentType>() {
            Ok(content_type) => Some(content_type),
            Err(err) => {
                warn!("{err}");
                None
            }
        },
    };
    value_set.content_type = content_type;

    if !declared.kind.is_empty() {
        match declared.kind.parse::<ValueSetKind>() {
            Ok(kind) => value_set.kind = Some(kind),
            Err(_) => diagnostics.push(
                ValidationIssue::warning(
                    "VS004",
                    format!(
                        "Unrecognized value set type '{}' in file: {name}; inferring it instead",
                        declared.kind
                    ),
                )
                .in_sheet(name),
            ),
        }
    }
    if value_set.kind.is_none() {
        value_set.kind = Some(ValueSetKind::infer(content_type, &value_set.intent));
    }

    match content_type {
        Some(content_type) => match workbook.sheet(content_type.sheet_name()) {
            Some(sheet) => read_content(sheet, content_type, &mut value_set),
            None => diagnostics.push(
                ValidationIssue::error(
                    "VS005",
                    format!(
                        "No {} sheet in file: {name}",
                        content_type.sheet_name()
                    ),
                )
                .in_sheet(name),
            ),
        },
        None if declared.content_type.is_empty() => diagnostics.push(
            ValidationIssue::error("VS002", format!("No content type in file: {name}"))
                .in_sheet(name),
        ),
        None => diagnostics.push(
            ValidationIssue::error(
                "VS003",
                format!(
                    "Unrecognized content type '{}' in file: {name}",
                    declared.content_type
                ),
            )
            .in_sheet(name),
        ),
    }

    for issue in value_set.membership_issues() {
        diagnostics.push(issue.in_sheet(name));
    }
    debug!(
        kind = ?value_set.kind,
        members = value_set.members.len(),
        subsets = value_set.subsets.len(),
        issues = diagnostics.issues.len(),
        "value set parsed"
    );
    ParsedValueSet {
        value_set,
        diagnostics,
    }
}

fn read_description(
    sheet: &Sheet,
    value_set: &mut ValueSet,
    diagnostics: &mut Diagnostics,
) -> Declared {
    let mut declared = Declared::default();
    for row in sheet.values() {
        let Some(key) = row.first() else {
            continue;
        };
        let value = row.get(1).cloned().unwrap_or_default();
        match key.as_str() {
            keys::HANDLE => value_set.handle = value,
            keys::LABEL => value_set.label = value,
            keys::VALUE_SET_TYPE => declared.kind = value,
            keys::CONTENT_TYPE => declared.content_type = value,
            keys::DESCRIPTION => value_set.description = value,
            keys::OID => value_set.oid = value,
            keys::URL => value_set.uri = value,
            keys::CONCEPT => value_set.concept = value,
            keys::INTENT => value_set.intent = value,
            keys::REFERENCE => value_set.documentation.references.push(value),
            keys::NOTE => value_set.documentation.notes.push(value),
            keys::INFO_DETAILS_JSON => match serde_json::from_str(&value) {
                Ok(json) => value_set.info.details.push(InfoDetail::Json(json)),
                Err(err) => {
                    diagnostics.push(
                        ValidationIssue::warning(
                            "VS006",
                            format!("Invalid JSON info details ({err}); kept as text"),
                        )
                        .in_sheet(sheet.name()),
                    );
                    value_set.info.details.push(InfoDetail::Text(value));
                }
            },
            keys::INFO_DETAILS_TEXT => value_set.info.details.push(InfoDetail::Text(value)),
            _ => {}
        }
    }
    declared
}

fn read_content(sheet: &Sheet, content_type: ContentType, value_set: &mut ValueSet) {
    let records = values_to_records(sheet.values());
    match content_type {
        ContentType::Concepts => {
            value_set.members = records.iter().map(concept_from_record).collect();
        }
        ContentType::Drugs => {
            value_set.info.flags.push(DRUG_LIST_FLAG.to_string());
            value_set.members = records.iter().map(drug_from_record).collect();
        }
        ContentType::Subsets => {
            value_set.subsets = records
                .iter()
                .map(|record| {
                    VsReference::new(
                        field(record, "Value Set Label"),
                        field(record, "Filename"),
                        field(record, "Note"),
                    )
                })
                .filter(|reference| !reference.short_name.is_empty() || !reference.label.is_empty())
                .collect();
        }
    }
}

fn concept_from_record(record: &Record) -> Concept {
    let mut concept = Concept::new(
        field(record, "Label"),
        field(record, "Code"),
        field(record, "System"),
    );
    concept.note = field(record, "Note");
    concept
}

fn drug_from_record(record: &Record) -> Concept {
    let mut concept = concept_from_record(record);
    concept.category = field(record, "Category");
    let generic_name = field(record, "Generic Name");
    if !generic_name.is_empty() {
        concept
            .terms
            .push(Term::new(generic_name, TERM_CONTEXT_GENERIC_NAME));
    }
    let trade_names = match field(record, "Trade Name") {
        names if names.is_empty() => field(record, "Trade Name(s)"),
        names => names,
    };
    for name in trade_names.split(',').map(str::trim) {
        if !name.is_empty() {
            concept.terms.push(Term::new(name, TERM_CONTEXT_TRADE_NAME));
        }
    }
    concept
}
