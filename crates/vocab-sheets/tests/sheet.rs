//! Integration tests for the sheet grid accessor.

use proptest::prelude::*;

use vocab_sheets::{MemoryStore, Sheet, SheetError};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn sample_sheet() -> Sheet {
    Sheet::from_values(
        "Data Variables",
        vec![
            strings(&["Status", "Handle", "Label"]),
            strings(&["status", "handle"]),
            strings(&["ready", "dv_age", "Age"]),
        ],
    )
}

#[test]
fn pads_short_rows() {
    let sheet = sample_sheet();
    assert_eq!(sheet.rows(), 3);
    assert_eq!(sheet.cols(), 3);
    assert_eq!(sheet.row(1).unwrap(), strings(&["status", "handle", ""]).as_slice());
}

#[test]
fn named_columns_resolve_after_data_name_row() {
    let mut sheet = sample_sheet();
    assert!(matches!(
        sheet.cell_by_name(2, "handle"),
        Err(SheetError::ColumnNotFound { .. })
    ));
    sheet.set_data_name_row(1);
    assert_eq!(sheet.cell_by_name(2, "handle").unwrap(), "dv_age");
    assert_eq!(sheet.column_by_name("status").unwrap(), vec!["Status", "status", "ready"]);
    // Empty names are not columns.
    assert_eq!(sheet.column_index(""), None);
}

#[test]
fn unknown_column_does_not_stop_the_caller() {
    let sheet = sample_sheet();
    let missing = sheet.cell_by_name(2, "nope");
    assert!(missing.is_err());
    assert_eq!(sheet.cell(2, 1), Some("dv_age"));
}

#[test]
fn last_duplicate_name_wins() {
    let mut sheet = Sheet::from_values("dup", vec![strings(&["code", "label", "code"])]);
    sheet.set_data_name_row(0);
    assert_eq!(sheet.column_index("code"), Some(2));
}

#[test]
fn write_cell_grows_and_backfills() {
    let mut sheet = Sheet::new("Sheet1");
    sheet.write_cell(2, 3, "covid_Dx");
    assert_eq!(sheet.rows(), 3);
    assert_eq!(sheet.cols(), 4);
    assert_eq!(sheet.row(2).unwrap(), strings(&["", "", "", "covid_Dx"]).as_slice());
    assert_eq!(sheet.cell(0, 0), None);
}

#[test]
fn write_row_replaces_and_extends() {
    let mut sheet = sample_sheet();
    sheet.write_row(0, strings(&["a"]));
    assert_eq!(sheet.row(0).unwrap(), strings(&["a"]).as_slice());
    assert_eq!(sheet.cols(), 3);
    sheet.write_row(5, strings(&["a", "b", "c", "d", "e"]));
    assert_eq!(sheet.rows(), 6);
    assert_eq!(sheet.cols(), 5);
    assert_eq!(sheet.row(4).unwrap().len(), 0);
}

#[test]
fn trim_trailing_rows_drops_extra_rows() {
    let mut sheet = sample_sheet();
    sheet.append_row(strings(&["ready", "dv_sex", "Sex", "extra"]));
    assert_eq!(sheet.cols(), 4);
    sheet.trim_trailing_rows(2);
    assert_eq!(sheet.rows(), 2);
    assert_eq!(sheet.cols(), 3);
    sheet.trim_trailing_rows(10);
    assert_eq!(sheet.rows(), 2);
}

#[test]
fn save_writes_full_grid() {
    let mut store = MemoryStore::new();
    store.insert_workbook("wb", "Target", vec![("Sheet1".to_string(), Vec::new())]);
    let mut sheet = Sheet::new("Sheet1");
    sheet.write_cell(0, 2, "covid_Dx");
    sheet.save(&mut store, "wb").expect("save sheet");
    assert_eq!(
        store.sheet_values("wb", "Sheet1").unwrap(),
        &[strings(&["", "", "covid_Dx"])]
    );
}

#[test]
fn save_to_missing_sheet_fails() {
    let mut store = MemoryStore::new();
    store.insert_workbook("wb", "Target", Vec::new());
    let sheet = Sheet::new("Sheet1");
    assert!(sheet.save(&mut store, "wb").is_err());
}

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-z0-9]{0,4}", 0..6), 0..6)
}

proptest! {
    #[test]
    fn appended_row_reads_back(
        grid in grid_strategy(),
        row in prop::collection::vec("[A-Za-z0-9 .]{0,6}", 0..8),
    ) {
        let mut sheet = Sheet::from_values("prop", grid);
        sheet.append_row(row.clone());
        let last = sheet.rows() - 1;
        for (idx, value) in row.iter().enumerate() {
            prop_assert_eq!(sheet.cell(last, idx), Some(value.as_str()));
        }
        prop_assert!(sheet.cols() >= row.len());
    }

    #[test]
    fn name_lookup_matches_position(
        names in prop::collection::vec("[a-z]{1,3}", 1..6),
        data in prop::collection::vec(prop::collection::vec("[a-z0-9]{0,3}", 6), 1..5),
        edit in "[a-z]{0,4}",
    ) {
        let mut values = vec![names.clone()];
        values.extend(data);
        let mut sheet = Sheet::from_values("prop", values);
        sheet.set_data_name_row(0);
        // Edits to other rows leave the mapping alone.
        let last = sheet.rows() - 1;
        sheet.write_cell(last, 0, edit);
        for name in &names {
            let idx = names.iter().rposition(|candidate| candidate == name).unwrap();
            prop_assert_eq!(sheet.column_index(name), Some(idx));
            for row in 0..sheet.rows() {
                prop_assert_eq!(sheet.cell_by_name(row, name).ok(), sheet.cell(row, idx));
            }
        }
    }
}
