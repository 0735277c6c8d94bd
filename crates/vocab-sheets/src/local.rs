//! Grid store kept in a local directory.
//!
//! ```text
//! <root>/<workbook-id>/workbook.json   title, parent folders, sheet order
//! <root>/<workbook-id>/<file>.csv      one file per sheet
//! ```
//!
//! Workbook ids are handles of the title, suffixed `-2`, `-3`, ... when
//! taken. Ids and sheet file names only use `[a-z0-9._-]` and never start
//! with a dot, so each stays a single entry under its parent directory. Folders are plain parent ids recorded in the manifest.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vocab_model::handlify;

use crate::error::{StoreError, StoreResult};
use crate::store::{FileEntry, FileQuery, GridStore, SheetSpec};

const MANIFEST_FILE: &str = "workbook.json";

fn is_path_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '.' | '_' | '-')
}

fn is_path_component(text: &str) -> bool {
    !text.is_empty() && !text.starts_with('.') && text.chars().all(is_path_char)
}

/// Handle of `title` usable as one directory or file name.
fn path_component(title: &str, sep: char, max_len: usize, fallback: &str) -> String {
    let mut out = String::new();
    for ch in handlify(title, sep, 0).chars() {
        let ch = if is_path_char(ch) { ch } else { sep };
        if ch == sep && out.ends_with(sep) {
            continue;
        }
        out.push(ch);
    }
    let trimmed: String = out
        .trim_start_matches(['.', sep])
        .chars()
        .take(max_len)
        .collect();
    match trimmed.trim_end_matches(sep) {
        "" => fallback.to_string(),
        component => component.to_string(),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WorkbookManifest {
    title: String,
    #[serde(default)]
    parents: Vec<String>,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SheetEntry {
    title: String,
    file: String,
}

impl WorkbookManifest {
    fn sheet(&self, name: &str) -> Option<&SheetEntry> {
        self.sheets.iter().find(|entry| entry.title == name)
    }

    fn push_sheet(&mut self, title: &str) -> &SheetEntry {
        let stem = path_component(title, '_', 48, "sheet");
        let mut file = format!("{stem}.csv");
        let mut n = 2;
        while self.sheets.iter().any(|entry| entry.file == file) {
            file = format!("{stem}-{n}.csv");
            n += 1;
        }
        self.sheets.push(SheetEntry {
            title: title.to_string(),
            file,
        });
        &self.sheets[self.sheets.len() - 1]
    }
}

/// Directory-backed grid store.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| StoreError::io(&root, err))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn workbook_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    fn manifest_path(&self, id: &str) -> PathBuf {
        self.workbook_dir(id).join(MANIFEST_FILE)
    }

    fn read_manifest(&self, id: &str) -> StoreResult<WorkbookManifest> {
        if !is_path_component(id) {
            return Err(StoreError::WorkbookNotFound(id.to_string()));
        }
        let path = self.manifest_path(id);
        if !path.is_file() {
            return Err(StoreError::WorkbookNotFound(id.to_string()));
        }
        let text = fs::read_to_string(&path).map_err(|err| StoreError::io(&path, err))?;
        serde_json::from_str(&text).map_err(|source| StoreError::Manifest { path, source })
    }

    fn write_manifest(&self, id: &str, manifest: &WorkbookManifest) -> StoreResult<()> {
        let path = self.manifest_path(id);
        let text = serde_json::to_string_pretty(manifest).map_err(|source| {
            StoreError::Manifest {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, text).map_err(|err| StoreError::io(&path, err))
    }

    fn sheet_path(&self, id: &str, manifest: &WorkbookManifest, name: &str) -> StoreResult<PathBuf> {
        manifest
            .sheet(name)
            .map(|entry| self.workbook_dir(id).join(&entry.file))
            .ok_or_else(|| StoreError::SheetNotFound {
                workbook: id.to_string(),
                sheet: name.to_string(),
            })
    }

    fn unique_id(&self, title: &str) -> String {
        let stem = path_component(title, '-', 64, "workbook");
        let mut id = stem.clone();
        let mut n = 2;
        while self.workbook_dir(&id).exists() {
            id = format!("{stem}-{n}");
            n += 1;
        }
        id
    }

    fn workbook_ids(&self) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|err| StoreError::io(&self.root, err))?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&self.root, err))?;
            let path = entry.path();
            if path.join(MANIFEST_FILE).is_file()
                && let Some(name) = path.file_name().and_then(|name| name.to_str())
            {
                ids.push(name.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

fn read_grid(path: &Path) -> StoreResult<Vec<Vec<String>>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| StoreError::csv(path, err))?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| StoreError::csv(path, err))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_grid(path: &Path, grid: &[Vec<String>]) -> StoreResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| StoreError::csv(path, err))?;
    for row in grid {
        // A record with no fields would be written as a blank line, which
        // the reader skips.
        if row.is_empty() {
            writer
                .write_record([""])
                .map_err(|err| StoreError::csv(path, err))?;
        } else {
            writer
                .write_record(row)
                .map_err(|err| StoreError::csv(path, err))?;
        }
    }
    writer.flush().map_err(|err| StoreError::io(path, err))
}

impl GridStore for LocalStore {
    fn workbook_title(&self, workbook_id: &str) -> StoreResult<String> {
        Ok(self.read_manifest(workbook_id)?.title)
    }

    fn list_sheet_names(&self, workbook_id: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .read_manifest(workbook_id)?
            .sheets
            .into_iter()
            .map(|entry| entry.title)
            .collect())
    }

    fn fetch_sheet(&self, workbook_id: &str, sheet_name: &str) -> StoreResult<Vec<Vec<String>>> {
        let manifest = self.read_manifest(workbook_id)?;
        let path = self.sheet_path(workbook_id, &manifest, sheet_name)?;
        read_grid(&path)
    }

    fn write_sheet(
        &mut self,
        workbook_id: &str,
        sheet_name: &str,
        grid: &[Vec<String>],
    ) -> StoreResult<()> {
        let manifest = self.read_manifest(workbook_id)?;
        let path = self.sheet_path(workbook_id, &manifest, sheet_name)?;
        write_grid(&path, grid)
    }

    fn create_workbook(&mut self, title: &str, sheets: &[SheetSpec]) -> StoreResult<String> {
        let id = self.unique_id(title);
        let dir = self.workbook_dir(&id);
        fs::create_dir_all(&dir).map_err(|err| StoreError::io(&dir, err))?;
        let mut manifest = WorkbookManifest {
            title: title.to_string(),
            ..WorkbookManifest::default()
        };
        for spec in sheets {
            let file = manifest.push_sheet(&spec.title).file.clone();
            write_grid(&dir.join(file), &[])?;
        }
        self.write_manifest(&id, &manifest)?;
        debug!(id = %id, title, "workbook created");
        Ok(id)
    }

    fn add_sheet(&mut self, workbook_id: &str, sheet: &SheetSpec) -> StoreResult<()> {
        let mut manifest = self.read_manifest(workbook_id)?;
        if manifest.sheet(&sheet.title).is_some() {
            return Err(StoreError::SheetExists {
                workbook: workbook_id.to_string(),
                sheet: sheet.title.clone(),
            });
        }
        let file = manifest.push_sheet(&sheet.title).file.clone();
        write_grid(&self.workbook_dir(workbook_id).join(file), &[])?;
        self.write_manifest(workbook_id, &manifest)
    }

    fn move_file(&mut self, file_id: &str, from: Option<&str>, to: &str) -> StoreResult<()> {
        let mut manifest = self.read_manifest(file_id)?;
        if let Some(from) = from {
            manifest.parents.retain(|parent| parent != from);
        }
        if !manifest.parents.iter().any(|parent| parent == to) {
            manifest.parents.push(to.to_string());
        }
        self.write_manifest(file_id, &manifest)
    }

    fn lookup_file_name(&self, file_id: &str) -> StoreResult<String> {
        self.workbook_title(file_id)
    }

    fn search_files(&self, query: &FileQuery) -> StoreResult<Vec<FileEntry>> {
        let mut found = Vec::new();
        for id in self.workbook_ids()? {
            let manifest = self.read_manifest(&id)?;
            if query.matches(&manifest.title, &manifest.parents) {
                found.push(FileEntry {
                    id,
                    name: manifest.title,
                });
            }
        }
        Ok(found)
    }
}
