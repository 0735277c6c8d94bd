use tracing::{debug, error, info_span, warn};

use vocab_model::{DESCRIPTION_SHEET, ValueSetSheets};

use crate::error::{StoreError, StoreResult};
use crate::sheet::Sheet;
use crate::store::{GridStore, SheetSpec};

/// A workbook and all of its sheets, in store order.
///
/// Sheets are fetched in full when the workbook is opened or refreshed.
/// Nothing guards against another process editing the same workbook: the
/// last [`Sheet::save`] wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    id: String,
    name: String,
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(id: impl Into<String>, name: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sheets,
        }
    }

    /// Open a workbook and fetch every sheet.
    ///
    /// Store failures are logged; the workbook is then returned without a
    /// name or sheets.
    pub fn open(store: &dyn GridStore, id: &str) -> Self {
        let span = info_span!("workbook", id);
        let _guard = span.enter();
        let mut workbook = Self::new(id, "", Vec::new());
        match store.workbook_title(id) {
            Ok(title) => workbook.name = title,
            Err(err) => {
                error!("failed to open workbook: {err}");
                return workbook;
            }
        }
        workbook.refresh(store);
        debug!(name = %workbook.name, sheets = workbook.sheets.len(), "workbook opened");
        workbook
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Cached sheet names.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name() == name)
    }

    /// Look up a sheet and optionally designate its header and data-name rows.
    pub fn configure_sheet(
        &mut self,
        name: &str,
        header_row: Option<usize>,
        data_name_row: Option<usize>,
    ) -> Option<&Sheet> {
        let sheet = self.sheet_mut(name)?;
        if let Some(row) = header_row {
            sheet.set_header_row(row);
        }
        if let Some(row) = data_name_row {
            sheet.set_data_name_row(row);
        }
        Some(&*sheet)
    }

    /// Sheet names as currently listed by the store.
    pub fn fetch_sheet_names(&self, store: &dyn GridStore) -> Vec<String> {
        store.list_sheet_names(&self.id).unwrap_or_else(|err| {
            error!(workbook = %self.id, "failed to list sheets: {err}");
            Vec::new()
        })
    }

    /// Re-fetch every sheet from the store, dropping unsaved local edits.
    pub fn refresh(&mut self, store: &dyn GridStore) {
        self.sheets = self
            .fetch_sheet_names(store)
            .iter()
            .map(|name| Sheet::fetch(store, &self.id, name))
            .collect();
    }

    /// Add an empty sheet. Returns false when it exists or the store fails.
    pub fn add_sheet(&mut self, store: &mut dyn GridStore, name: &str) -> bool {
        if self.sheet(name).is_some() {
            warn!(workbook = %self.name, sheet = name, "sheet already exists");
            return false;
        }
        match store.add_sheet(&self.id, &SheetSpec::new(name)) {
            Ok(()) => {
                self.sheets.push(Sheet::new(name));
                true
            }
            Err(err) => {
                error!(workbook = %self.name, sheet = name, "failed to add sheet: {err}");
                false
            }
        }
    }

    /// Return the named sheet, creating it when neither the local copy nor
    /// the store has it.
    pub fn get_or_create_sheet(
        &mut self,
        store: &mut dyn GridStore,
        name: &str,
    ) -> Option<&mut Sheet> {
        debug!(workbook = %self.name, sheet = name, "get_or_create_sheet");
        if self.sheet(name).is_none() {
            let remote = self.fetch_sheet_names(&*store);
            if remote.iter().any(|remote_name| remote_name == name) {
                let sheet = Sheet::fetch(&*store, &self.id, name);
                self.sheets.push(sheet);
            } else if !self.add_sheet(store, name) {
                return None;
            }
        }
        self.sheet_mut(name)
    }

    pub fn save_sheet(&self, store: &mut dyn GridStore, name: &str) -> StoreResult<()> {
        match self.sheet(name) {
            Some(sheet) => sheet.save(store, &self.id),
            None => Err(StoreError::SheetNotFound {
                workbook: self.id.clone(),
                sheet: name.to_string(),
            }),
        }
    }

    /// Append a row to a sheet (creating it if needed) and save the sheet.
    pub fn append_row_to_sheet(
        &mut self,
        store: &mut dyn GridStore,
        name: &str,
        values: Vec<String>,
    ) -> StoreResult<()> {
        let id = self.id.clone();
        match self.get_or_create_sheet(store, name) {
            Some(sheet) => {
                sheet.append_row(values);
                sheet.save(store, &id)
            }
            None => Err(StoreError::SheetNotFound {
                workbook: id,
                sheet: name.to_string(),
            }),
        }
    }
}

/// Create a two-sheet value-set workbook (Description plus content) and
/// open it.
///
/// A failed sheet write leaves the new workbook behind; the error is
/// [`StoreError::Unfilled`] and names it.
pub fn create_value_set_workbook(
    store: &mut dyn GridStore,
    sheets: &ValueSetSheets,
) -> StoreResult<Workbook> {
    let content_sheet = sheets.content_sheet();
    let specs = [SheetSpec::new(DESCRIPTION_SHEET), SheetSpec::new(content_sheet)];
    let id = store.create_workbook(&sheets.title, &specs).inspect_err(|err| {
        error!(title = %sheets.title, "failed to create value set workbook: {err}");
    })?;
    let written = store
        .write_sheet(&id, DESCRIPTION_SHEET, &sheets.description)
        .and_then(|()| store.write_sheet(&id, content_sheet, &sheets.content));
    if let Err(err) = written {
        error!(
            title = %sheets.title,
            orphan = %id,
            "failed to fill value set workbook: {err}"
        );
        return Err(StoreError::Unfilled {
            workbook: id,
            source: Box::new(err),
        });
    }
    debug!(title = %sheets.title, id = %id, "value set workbook created");
    Ok(Workbook::open(&*store, &id))
}
