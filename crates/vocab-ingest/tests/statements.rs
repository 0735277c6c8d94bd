//! Integration tests for the statement / data-variable cross check.

use vocab_ingest::{
    DATA_VARIABLES_SHEET, STATEMENTS_SHEET, StatementCheckOptions, check_statement_variables,
    check_statement_workbook,
};
use vocab_sheets::{Sheet, Workbook};

fn row(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn header_rows(count: usize) -> Vec<Vec<String>> {
    (0..count).map(|idx| vec![format!("header {idx}")]).collect()
}

fn variables() -> Sheet {
    let mut values = header_rows(3);
    values.push(row(&["ready", "nvdnc-ns::age"]));
    values.push(row(&["ready", "sex"]));
    values.push(row(&["draft", "weight"]));
    Sheet::from_values(DATA_VARIABLES_SHEET, values)
}

fn statements() -> Sheet {
    let mut values = header_rows(3);
    values.push(row(&["ready", "", "", "stmt_age", "", "", "age"]));
    values.push(row(&["ready", "", "", "stmt_sex", "", "", "sex"]));
    values.push(row(&["ready", "", "", "stmt_weight", "", "", "weight"]));
    values.push(row(&["draft", "", "", "stmt_height", "", "", "height"]));
    Sheet::from_values(STATEMENTS_SHEET, values)
}

#[test]
fn reports_only_undefined_ready_variables() {
    let diagnostics =
        check_statement_variables(&statements(), &variables(), &StatementCheckOptions::default());
    assert_eq!(diagnostics.issues.len(), 1);
    assert_eq!(
        diagnostics.issues[0].message,
        "Data variable weight not found (statement stmt_weight)"
    );
}

#[test]
fn header_only_sheets_have_no_issues() {
    let empty = Sheet::from_values(STATEMENTS_SHEET, header_rows(3));
    let diagnostics =
        check_statement_variables(&empty, &variables(), &StatementCheckOptions::default());
    assert!(diagnostics.is_empty());
}

#[test]
fn workbook_without_sheets_is_reported() {
    let workbook = Workbook::new("id", "Statements", vec![statements()]);
    let diagnostics = check_statement_workbook(&workbook, &StatementCheckOptions::default());
    assert_eq!(diagnostics.error_count(), 1);
    assert!(diagnostics.issues[0].message.contains(DATA_VARIABLES_SHEET));

    let complete = Workbook::new("id", "Statements", vec![statements(), variables()]);
    let diagnostics = check_statement_workbook(&complete, &StatementCheckOptions::default());
    assert_eq!(diagnostics.error_count(), 1);
}

#[test]
fn issue_serializes_with_sheet() {
    let diagnostics =
        check_statement_variables(&statements(), &variables(), &StatementCheckOptions::default());
    insta::assert_json_snapshot!(diagnostics, @r#"
    {
      "issues": [
        {
          "code": "ST001",
          "message": "Data variable weight not found (statement stmt_weight)",
          "severity": "error",
          "sheet": "Statements",
          "count": null
        }
      ]
    }
    "#);
}
