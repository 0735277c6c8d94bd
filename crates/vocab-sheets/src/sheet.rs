use std::collections::BTreeMap;

use tracing::{error, warn};

use crate::error::{SheetError, StoreResult};
use crate::store::GridStore;

/// One named grid of string cells.
///
/// Rows loaded from a store are padded to the widest row. Writes grow the
/// grid as needed and back-fill new cells with `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    values: Vec<Vec<String>>,
    cols: usize,
    header: Vec<String>,
    data_names: Vec<String>,
    columns: BTreeMap<String, usize>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a sheet from raw rows, padding short rows with `""`.
    pub fn from_values(name: impl Into<String>, mut values: Vec<Vec<String>>) -> Self {
        let cols = values.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut values {
            row.resize(cols, String::new());
        }
        Self {
            name: name.into(),
            values,
            cols,
            ..Self::default()
        }
    }

    /// Read a sheet from the store. A failed read is logged and yields an
    /// empty sheet.
    pub fn fetch(store: &dyn GridStore, workbook_id: &str, name: &str) -> Self {
        match store.fetch_sheet(workbook_id, name) {
            Ok(values) => Self::from_values(name, values),
            Err(err) => {
                error!(workbook = workbook_id, sheet = name, "failed to fetch sheet: {err}");
                Self::new(name)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.values.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[Vec<String>] {
        &self.values
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn data_names(&self) -> &[String] {
        &self.data_names
    }

    pub fn set_header_row(&mut self, row: usize) {
        match self.values.get(row) {
            Some(values) => self.header = values.clone(),
            None => warn!(sheet = %self.name, row, "header row is outside the sheet"),
        }
    }

    /// Use the cells of `row` as column names.
    ///
    /// The mapping is rebuilt from scratch and then frozen: later edits to
    /// the grid do not change it. Empty cells are skipped and a repeated
    /// name maps to its last column.
    pub fn set_data_name_row(&mut self, row: usize) {
        let Some(values) = self.values.get(row) else {
            warn!(sheet = %self.name, row, "data name row is outside the sheet");
            return;
        };
        self.data_names = values.clone();
        self.columns.clear();
        for (idx, name) in self.data_names.iter().enumerate() {
            if !name.is_empty() {
                self.columns.insert(name.clone(), idx);
            }
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.values
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
    }

    /// Cell in a named column.
    ///
    /// An unknown name is logged and returned as an error so the caller can
    /// carry on.
    pub fn cell_by_name(&self, row: usize, name: &str) -> Result<&str, SheetError> {
        let col = self.resolve(name)?;
        self.cell(row, col).ok_or_else(|| SheetError::CellOutOfRange {
            sheet: self.name.clone(),
            row,
            col,
        })
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.values.get(row).map(Vec::as_slice)
    }

    /// Every cell of a column, top to bottom; missing cells read as `""`.
    pub fn column(&self, col: usize) -> Vec<&str> {
        self.values
            .iter()
            .map(|cells| cells.get(col).map_or("", String::as_str))
            .collect()
    }

    pub fn column_by_name(&self, name: &str) -> Result<Vec<&str>, SheetError> {
        let col = self.resolve(name)?;
        Ok(self.column(col))
    }

    fn resolve(&self, name: &str) -> Result<usize, SheetError> {
        self.column_index(name).ok_or_else(|| {
            warn!(sheet = %self.name, column = name, "column not found");
            SheetError::ColumnNotFound {
                sheet: self.name.clone(),
                column: name.to_string(),
            }
        })
    }

    pub fn write_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if self.values.len() <= row {
            self.values.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.values[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.into();
        self.cols = self.cols.max(col + 1);
    }

    /// Replace a whole row, growing the grid when `row` is past the end.
    pub fn write_row(&mut self, row: usize, values: Vec<String>) {
        if self.values.len() <= row {
            self.values.resize_with(row + 1, Vec::new);
        }
        self.cols = self.cols.max(values.len());
        self.values[row] = values;
    }

    pub fn append_row(&mut self, values: Vec<String>) {
        self.cols = self.cols.max(values.len());
        self.values.push(values);
    }

    /// Drop every row past the first `target` rows.
    pub fn trim_trailing_rows(&mut self, target: usize) {
        self.values.truncate(target);
        self.cols = self.values.iter().map(Vec::len).max().unwrap_or(0);
    }

    /// Write the whole grid back to the store in one call.
    pub fn save(&self, store: &mut dyn GridStore, workbook_id: &str) -> StoreResult<()> {
        store.write_sheet(workbook_id, &self.name, &self.values)
    }
}
