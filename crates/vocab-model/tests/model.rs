#![allow(missing_docs)]

use vocab_model::{
    Concept, ContentType, InfoDetail, TERM_CONTEXT_GENERIC_NAME, TERM_CONTEXT_TRADE_NAME, Term,
    ValueSet, ValueSetKind, VsReference,
};

fn render(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn concept_display() {
    let concept = Concept::new("Cholera", "A00", "ICD-10");
    assert_eq!(concept.to_string(), "ICD-10::A00::Cholera");
}

#[test]
fn description_rows_skip_empty_fields() {
    let mut value_set = ValueSet::new();
    value_set.label = "Covid-19 Dx".to_string();
    value_set.handle = "covid_19_dx".to_string();
    value_set.kind = Some(ValueSetKind::Extensional);
    value_set.oid = "2.16.840.1".to_string();
    value_set.documentation.references = vec!["ref-a".to_string(), "ref-b".to_string()];
    value_set.documentation.notes = vec!["reviewed".to_string()];
    value_set
        .info
        .details
        .push(InfoDetail::Json(serde_json::json!({"source": "nice"})));

    insta::assert_snapshot!(render(&value_set.description_rows()), @r#"
    Label | Covid-19 Dx
    Handle | covid_19_dx
    Value Set Type | extensional
    Content Type | concepts
    OID | 2.16.840.1
    Reference | ref-a
    Reference | ref-b
    Note | reviewed
    Info-details-json | {"source":"nice"}
    "#);
}

#[test]
fn grouping_content_rows() {
    let mut value_set = ValueSet::new();
    value_set.kind = Some(ValueSetKind::Grouping);
    value_set.subsets = vec![
        VsReference::new("Covid Dx (ICD-10)", "covid_Dx (ICD-10)", ""),
        VsReference::new("Covid Dx (SNOMED)", "covid_Dx (SNOMED)", "draft"),
    ];
    assert_eq!(value_set.effective_content_type(), ContentType::Subsets);
    let rows = value_set.content_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Filename", "Value Set Label", "Note"]);
    assert_eq!(
        rows[2],
        vec!["covid_Dx (SNOMED)", "Covid Dx (SNOMED)", "draft"]
    );
}

#[test]
fn drug_content_rows_carry_terms() {
    let mut concept = Concept::new("Paracetamol", "", "");
    concept.category = "Analgesic".to_string();
    concept.terms = vec![
        Term::new("paracetamol", TERM_CONTEXT_GENERIC_NAME),
        Term::new("Panadol", TERM_CONTEXT_TRADE_NAME),
        Term::new("Calpol", TERM_CONTEXT_TRADE_NAME),
    ];
    let mut value_set = ValueSet::new();
    value_set.content_type = Some(ContentType::Drugs);
    value_set.members.push(concept);

    let sheets = value_set.to_sheets("paracetamol (Name)");
    assert_eq!(sheets.content_sheet(), "Drugs");
    assert_eq!(
        sheets.content[1],
        vec![
            "Paracetamol",
            "",
            "",
            "",
            "paracetamol",
            "Panadol, Calpol",
            "Analgesic"
        ]
    );
}

#[test]
fn membership_checks_follow_kind() {
    let mut grouping = ValueSet::new();
    grouping.handle = "empty_group".to_string();
    grouping.kind = Some(ValueSetKind::Grouping);
    let issues = grouping.membership_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, "VS021");

    let mut intensional = ValueSet::new();
    intensional.kind = Some(ValueSetKind::Intensional);
    intensional.intent = "ICD-10: B99.x".to_string();
    assert!(intensional.membership_issues().is_empty());
}
