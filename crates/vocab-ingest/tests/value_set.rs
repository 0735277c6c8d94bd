//! Integration tests for value-set parsing.

use vocab_ingest::value_set::DRUG_LIST_FLAG;
use vocab_ingest::{check_duplicate_handles, value_set_from_workbook};
use vocab_model::{ContentType, InfoDetail, ValueSet, ValueSetKind};
use vocab_sheets::{Sheet, Workbook};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|row| strings(row)).collect()
}

fn workbook(name: &str, sheets: Vec<(&str, Vec<Vec<String>>)>) -> Workbook {
    Workbook::new(
        "id",
        name,
        sheets
            .into_iter()
            .map(|(sheet, values)| Sheet::from_values(sheet, values))
            .collect(),
    )
}

#[test]
fn parses_concept_value_set() {
    let book = workbook(
        "covid_Dx (ICD-10)",
        vec![
            (
                "Description",
                grid(&[
                    &["Label", "Covid-19 Dx (ICD-10)"],
                    &["Handle", "covid_19_dx_icd10"],
                    &["Content Type", "concepts"],
                    &["OID", "2.16.840.1"],
                    &["URL", "https://example.org/vs/covid"],
                    &["Reference", "NICE NG191"],
                    &["Note", "first"],
                    &["Note", "second"],
                    &["Info-details-json", r#"{"reviewed": true}"#],
                    &["Info-details-text", "plain"],
                    &["Unrelated", "ignored"],
                ]),
            ),
            (
                "Concepts",
                grid(&[
                    &["Label", "Code", "System", "Note"],
                    &["Cholera", "A00", "ICD-10", ""],
                    &["Typhoid", "A01", "ICD-10", "check"],
                ]),
            ),
        ],
    );

    let parsed = value_set_from_workbook(&book);
    assert!(parsed.diagnostics.is_empty(), "{:?}", parsed.diagnostics);
    let vs = &parsed.value_set;
    assert_eq!(vs.handle, "covid_19_dx_icd10");
    assert_eq!(vs.kind, Some(ValueSetKind::Extensional));
    assert_eq!(vs.content_type, Some(ContentType::Concepts));
    assert_eq!(vs.uri, "https://example.org/vs/covid");
    assert_eq!(vs.info.short_name, "covid_Dx (ICD-10)");
    assert_eq!(vs.documentation.references, vec!["NICE NG191"]);
    assert_eq!(vs.documentation.notes, vec!["first", "second"]);
    assert_eq!(
        vs.info.details,
        vec![
            InfoDetail::Json(serde_json::json!({"reviewed": true})),
            InfoDetail::Text("plain".to_string()),
        ]
    );
    assert_eq!(vs.members.len(), 2);
    assert_eq!(vs.members[1].to_string(), "ICD-10::A01::Typhoid");
    assert_eq!(vs.members[1].note, "check");
}

#[test]
fn infers_grouping_from_subsets() {
    let book = workbook(
        "covid_Dx",
        vec![
            ("Description", grid(&[&["Content Type", "subsets"]])),
            (
                "Subsets",
                grid(&[
                    &["Filename", "Value Set Label", "Note"],
                    &["covid_Dx (ICD-10)", "Covid-19 Dx (ICD-10)", ""],
                    &["", "", "orphan note"],
                    &["", "Label only", ""],
                ]),
            ),
        ],
    );
    let parsed = value_set_from_workbook(&book);
    assert!(parsed.is_ok());
    assert_eq!(parsed.value_set.kind, Some(ValueSetKind::Grouping));
    assert_eq!(parsed.value_set.subsets.len(), 2);
    assert_eq!(parsed.value_set.subsets[0].short_name, "covid_Dx (ICD-10)");
    assert_eq!(parsed.value_set.subsets[1].label, "Label only");
}

#[test]
fn infers_intensional_from_intent() {
    let book = workbook(
        "covid_Dx (ICD-10)",
        vec![
            (
                "Description",
                grid(&[&["Content Type", "concepts"], &["Intent", "ICD-10: B99.x"]]),
            ),
            ("Concepts", grid(&[&["Label", "Code", "System", "Note"]])),
        ],
    );
    let parsed = value_set_from_workbook(&book);
    assert!(parsed.diagnostics.is_empty());
    assert_eq!(parsed.value_set.kind, Some(ValueSetKind::Intensional));
    assert!(parsed.value_set.members.is_empty());
}

#[test]
fn infers_extensional_by_default() {
    let book = workbook(
        "plain",
        vec![
            ("Description", grid(&[&["Content Type", "concepts"]])),
            (
                "Concepts",
                grid(&[&["Label", "Code", "System", "Note"], &["Cholera", "A00", "ICD-10", ""]]),
            ),
        ],
    );
    let parsed = value_set_from_workbook(&book);
    assert_eq!(parsed.value_set.kind, Some(ValueSetKind::Extensional));
}

#[test]
fn explicit_kind_wins_and_unknown_kind_is_inferred() {
    let explicit = workbook(
        "explicit",
        vec![
            (
                "Description",
                grid(&[&["Value Set Type", "grouping"], &["Content Type", "concepts"]]),
            ),
            ("Concepts", grid(&[&["Label", "Code", "System", "Note"]])),
        ],
    );
    let parsed = value_set_from_workbook(&explicit);
    assert_eq!(parsed.value_set.kind, Some(ValueSetKind::Grouping));

    let unknown = workbook(
        "covid_Dx",
        vec![
            (
                "Description",
                grid(&[&["Value Set Type", "Diagnosis"], &["Content Type", "concepts"]]),
            ),
            (
                "Concepts",
                grid(&[&["Label", "Code", "System", "Note"], &["Cholera", "A00", "ICD-10", ""]]),
            ),
        ],
    );
    let parsed = value_set_from_workbook(&unknown);
    assert_eq!(parsed.value_set.kind, Some(ValueSetKind::Extensional));
    assert!(parsed.diagnostics.contains("VS004"));
    assert!(!parsed.diagnostics.has_errors());
}

#[test]
fn parses_drug_terms() {
    let book = workbook(
        "paracetamol",
        vec![
            ("Description", grid(&[&["Content Type", "drugs"]])),
            (
                "Drugs",
                grid(&[
                    &["Label", "Code", "System", "Note", "Generic Name", "Trade Name(s)", "Category"],
                    &["Paracetamol", "", "", "", "paracetamol", "Panadol, Calpol ,", "Analgesic"],
                ]),
            ),
        ],
    );
    let parsed = value_set_from_workbook(&book);
    let vs = &parsed.value_set;
    assert_eq!(vs.info.flags, vec![DRUG_LIST_FLAG]);
    let concept = &vs.members[0];
    assert_eq!(concept.generic_name(), Some("paracetamol"));
    assert_eq!(concept.trade_names().collect::<Vec<_>>(), vec!["Panadol", "Calpol"]);
    assert_eq!(concept.category, "Analgesic");
}

#[test]
fn missing_sheets_are_reported_not_raised() {
    let no_description = workbook("empty", vec![("Sheet1", Vec::new())]);
    let parsed = value_set_from_workbook(&no_description);
    assert!(parsed.diagnostics.contains("VS001"));
    assert_eq!(parsed.value_set.kind, None);

    let no_content_type = workbook("untyped", vec![("Description", grid(&[&["Label", "x"]]))]);
    let parsed = value_set_from_workbook(&no_content_type);
    assert!(parsed.diagnostics.contains("VS002"));
    assert_eq!(
        parsed.diagnostics.issues[0].message,
        "No content type in file: untyped"
    );

    let bad_content_type = workbook(
        "odd",
        vec![("Description", grid(&[&["Content Type", "codes"]]))],
    );
    assert!(value_set_from_workbook(&bad_content_type).diagnostics.contains("VS003"));

    let no_content_sheet = workbook(
        "lost",
        vec![("Description", grid(&[&["Content Type", "drugs"]]))],
    );
    assert!(value_set_from_workbook(&no_content_sheet).diagnostics.contains("VS005"));
}

#[test]
fn invalid_json_is_kept_as_text() {
    let book = workbook(
        "json",
        vec![
            (
                "Description",
                grid(&[&["Content Type", "subsets"], &["Info-details-json", "{oops"]]),
            ),
            ("Subsets", grid(&[&["Filename", "Value Set Label", "Note"], &["a", "A", ""]])),
        ],
    );
    let parsed = value_set_from_workbook(&book);
    assert!(parsed.diagnostics.contains("VS006"));
    assert_eq!(
        parsed.value_set.info.details,
        vec![InfoDetail::Text("{oops".to_string())]
    );
}

#[test]
fn written_value_set_parses_back() {
    let mut original = ValueSet::new();
    original.label = "Covid-19 Tx (Name)".to_string();
    original.handle = "covid_tx_name".to_string();
    original.kind = Some(ValueSetKind::Extensional);
    original.content_type = Some(ContentType::Drugs);
    original.documentation.notes.push("n".to_string());
    let mut concept = vocab_model::Concept::new("Remdesivir", "", "");
    concept.terms.push(vocab_model::Term::new(
        "remdesivir",
        vocab_model::TERM_CONTEXT_GENERIC_NAME,
    ));
    original.members.push(concept);

    let sheets = original.to_sheets("covid_Tx (Name)");
    let book = workbook(
        &sheets.title,
        vec![
            ("Description", sheets.description.clone()),
            (sheets.content_sheet(), sheets.content.clone()),
        ],
    );
    let parsed = value_set_from_workbook(&book);
    assert!(parsed.diagnostics.is_empty());
    let mut expected = original.clone();
    expected.info.short_name = "covid_Tx (Name)".to_string();
    expected.info.flags.push(DRUG_LIST_FLAG.to_string());
    assert_eq!(parsed.value_set, expected);
}

#[test]
fn duplicate_handles_across_parsed_sets() {
    let make = |name: &str| {
        workbook(
            name,
            vec![
                (
                    "Description",
                    grid(&[&["Handle", "shared"], &["Content Type", "concepts"]]),
                ),
                (
                    "Concepts",
                    grid(&[&["Label", "Code", "System", "Note"], &["x", "1", "S", ""]]),
                ),
            ],
        )
    };
    let sets: Vec<ValueSet> = ["a", "b"]
        .into_iter()
        .map(|name| value_set_from_workbook(&make(name)).value_set)
        .collect();
    assert_eq!(check_duplicate_handles(&sets).warning_count(), 1);
}
