//! The external grid store the sheets are read from and written to.
//!
//! Authentication and transport belong to the implementation; callers only
//! see workbooks addressed by id and sheets addressed by name.

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Initial row capacity of a sheet added to an existing workbook.
pub const DEFAULT_ROW_COUNT: usize = 100;
/// Initial column capacity of a sheet added to an existing workbook.
pub const DEFAULT_COLUMN_COUNT: usize = 4;

/// Sheet to create, with its initial grid capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    pub title: String,
    pub row_count: usize,
    pub column_count: usize,
}

impl SheetSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            row_count: DEFAULT_ROW_COUNT,
            column_count: DEFAULT_COLUMN_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
}

/// File search filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileQuery {
    /// Case-insensitive substring of the file name.
    pub name_contains: Option<String>,
    /// Folder the file must be in.
    pub parent: Option<String>,
}

impl FileQuery {
    pub fn name_contains(text: impl Into<String>) -> Self {
        Self {
            name_contains: Some(text.into()),
            parent: None,
        }
    }

    #[must_use]
    pub fn in_folder(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Whether a file with this name and these parents matches.
    pub fn matches(&self, name: &str, parents: &[String]) -> bool {
        let name_ok = self
            .name_contains
            .as_ref()
            .is_none_or(|text| name.to_lowercase().contains(&text.to_lowercase()));
        let parent_ok = self
            .parent
            .as_ref()
            .is_none_or(|parent| parents.iter().any(|p| p == parent));
        name_ok && parent_ok
    }
}

/// Row/column grid store plus the file operations the builder needs.
///
/// Rows and columns are 0-based; grids are full-sheet snapshots and
/// `write_sheet` overwrites the whole sheet.
pub trait GridStore {
    /// Title of a workbook.
    fn workbook_title(&self, workbook_id: &str) -> StoreResult<String>;

    /// Sheet names in workbook order.
    fn list_sheet_names(&self, workbook_id: &str) -> StoreResult<Vec<String>>;

    fn fetch_sheet(&self, workbook_id: &str, sheet_name: &str) -> StoreResult<Vec<Vec<String>>>;

    fn write_sheet(
        &mut self,
        workbook_id: &str,
        sheet_name: &str,
        grid: &[Vec<String>],
    ) -> StoreResult<()>;

    /// Create a workbook with the given sheets and return its id.
    fn create_workbook(&mut self, title: &str, sheets: &[SheetSpec]) -> StoreResult<String>;

    fn add_sheet(&mut self, workbook_id: &str, sheet: &SheetSpec) -> StoreResult<()>;

    /// Add `to` as a parent of the file, removing `from` when given.
    fn move_file(&mut self, file_id: &str, from: Option<&str>, to: &str) -> StoreResult<()>;

    fn lookup_file_name(&self, file_id: &str) -> StoreResult<String>;

    fn search_files(&self, query: &FileQuery) -> StoreResult<Vec<FileEntry>>;
}
