use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};
use crate::store::{FileEntry, FileQuery, GridStore, SheetSpec};

#[derive(Debug, Clone, Default)]
struct MemoryFile {
    title: String,
    parents: Vec<String>,
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryFile {
    fn sheet(&self, name: &str) -> Option<&Vec<Vec<String>>> {
        self.sheets
            .iter()
            .find(|(title, _)| title == name)
            .map(|(_, grid)| grid)
    }
}

/// Grid store held entirely in memory. Workbook ids are `wb-1`, `wb-2`, ...
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, MemoryFile>,
    next_id: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a workbook under a chosen id, replacing any existing one.
    pub fn insert_workbook(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        sheets: Vec<(String, Vec<Vec<String>>)>,
    ) {
        self.files.insert(
            id.into(),
            MemoryFile {
                title: title.into(),
                parents: Vec::new(),
                sheets,
            },
        );
    }

    pub fn workbook_ids(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    pub fn parents(&self, file_id: &str) -> Option<&[String]> {
        self.files.get(file_id).map(|file| file.parents.as_slice())
    }

    pub fn sheet_values(&self, workbook_id: &str, sheet_name: &str) -> Option<&[Vec<String>]> {
        self.files
            .get(workbook_id)
            .and_then(|file| file.sheet(sheet_name))
            .map(Vec::as_slice)
    }

    fn file(&self, id: &str) -> StoreResult<&MemoryFile> {
        self.files
            .get(id)
            .ok_or_else(|| StoreError::WorkbookNotFound(id.to_string()))
    }

    fn file_mut(&mut self, id: &str) -> StoreResult<&mut MemoryFile> {
        self.files
            .get_mut(id)
            .ok_or_else(|| StoreError::WorkbookNotFound(id.to_string()))
    }
}

impl GridStore for MemoryStore {
    fn workbook_title(&self, workbook_id: &str) -> StoreResult<String> {
        Ok(self.file(workbook_id)?.title.clone())
    }

    fn list_sheet_names(&self, workbook_id: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .file(workbook_id)?
            .sheets
            .iter()
            .map(|(title, _)| title.clone())
            .collect())
    }

    fn fetch_sheet(&self, workbook_id: &str, sheet_name: &str) -> StoreResult<Vec<Vec<String>>> {
        self.file(workbook_id)?
            .sheet(sheet_name)
            .cloned()
            .ok_or_else(|| StoreError::SheetNotFound {
                workbook: workbook_id.to_string(),
                sheet: sheet_name.to_string(),
            })
    }

    fn write_sheet(
        &mut self,
        workbook_id: &str,
        sheet_name: &str,
        grid: &[Vec<String>],
    ) -> StoreResult<()> {
        let file = self.file_mut(workbook_id)?;
        let Some((_, values)) = file.sheets.iter_mut().find(|(title, _)| title == sheet_name)
        else {
            return Err(StoreError::SheetNotFound {
                workbook: workbook_id.to_string(),
                sheet: sheet_name.to_string(),
            });
        };
        *values = grid.to_vec();
        Ok(())
    }

    fn create_workbook(&mut self, title: &str, sheets: &[SheetSpec]) -> StoreResult<String> {
        self.next_id += 1;
        let id = format!("wb-{}", self.next_id);
        let sheets = sheets
            .iter()
            .map(|spec| (spec.title.clone(), Vec::new()))
            .collect();
        self.insert_workbook(id.clone(), title, sheets);
        Ok(id)
    }

    fn add_sheet(&mut self, workbook_id: &str, sheet: &SheetSpec) -> StoreResult<()> {
        let file = self.file_mut(workbook_id)?;
        if file.sheet(&sheet.title).is_some() {
            return Err(StoreError::SheetExists {
                workbook: workbook_id.to_string(),
                sheet: sheet.title.clone(),
            });
        }
        file.sheets.push((sheet.title.clone(), Vec::new()));
        Ok(())
    }

    fn move_file(&mut self, file_id: &str, from: Option<&str>, to: &str) -> StoreResult<()> {
        let file = self.file_mut(file_id)?;
        if let Some(from) = from {
            file.parents.retain(|parent| parent != from);
        }
        if !file.parents.iter().any(|parent| parent == to) {
            file.parents.push(to.to_string());
        }
        Ok(())
    }

    fn lookup_file_name(&self, file_id: &str) -> StoreResult<String> {
        self.workbook_title(file_id)
    }

    fn search_files(&self, query: &FileQuery) -> StoreResult<Vec<FileEntry>> {
        Ok(self
            .files
            .iter()
            .filter(|(_, file)| query.matches(&file.title, &file.parents))
            .map(|(id, file)| FileEntry {
                id: id.clone(),
                name: file.title.clone(),
            })
            .collect())
    }
}
