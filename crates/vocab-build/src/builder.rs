//! Commit sheet plans to a grid store.

use tracing::{error, info, info_span, warn};

use vocab_model::{Diagnostics, ValidationIssue, ValueSetKind};
use vocab_sheets::{GridStore, Sheet, Workbook, create_value_set_workbook};

use crate::config::BuilderConfig;
use crate::pace::Pacer;
use crate::plan::{PlannedValueSet, plan_sheet};

/// A value-set workbook written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedValueSet {
    pub filename: String,
    pub label: String,
    pub kind: ValueSetKind,
    pub system: Option<String>,
    pub workbook_id: String,
    /// Folder the workbook was moved into; `None` when the move failed.
    pub folder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet: String,
    pub created: Vec<CreatedValueSet>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub source: String,
    pub sheets: Vec<SheetReport>,
    /// Issues not tied to one sheet.
    pub diagnostics: Diagnostics,
}

impl BuildSummary {
    pub fn created_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.created.len()).sum()
    }

    /// Every issue, run-level first.
    pub fn all_issues(&self) -> Diagnostics {
        let mut all = self.diagnostics.clone();
        for sheet in &self.sheets {
            all.extend(sheet.diagnostics.clone());
        }
        all
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors() || self.sheets.iter().any(|sheet| sheet.diagnostics.has_errors())
    }
}

/// Build every value set for one source sheet, then the grouping set, and
/// move each into its destination folder.
pub fn build_sheet(store: &mut dyn GridStore, sheet: &Sheet, config: &BuilderConfig) -> SheetReport {
    let mut report = SheetReport {
        sheet: sheet.name().to_string(),
        ..SheetReport::default()
    };
    let plan = match plan_sheet(sheet, config) {
        Ok(plan) => plan,
        Err(err) => {
            warn!(sheet = sheet.name(), "skipping sheet: {err}");
            report
                .diagnostics
                .push(ValidationIssue::error("BD001", err.to_string()).in_sheet(sheet.name()));
            return report;
        }
    };
    report.diagnostics.extend(plan.diagnostics.clone());
    for planned in plan.value_sets() {
        if let Some(created) = commit(store, planned, config, &mut report.diagnostics, sheet.name()) {
            report.created.push(created);
        }
    }
    info!(sheet = sheet.name(), created = report.created.len(), "sheet built");
    report
}

fn commit(
    store: &mut dyn GridStore,
    planned: &PlannedValueSet,
    config: &BuilderConfig,
    diagnostics: &mut Diagnostics,
    sheet: &str,
) -> Option<CreatedValueSet> {
    let workbook = match create_value_set_workbook(store, &planned.sheets) {
        Ok(workbook) => workbook,
        Err(err) => {
            diagnostics.push(
                ValidationIssue::error(
                    "BD010",
                    format!("Failed to create value set workbook {}: {err}", planned.filename),
                )
                .in_sheet(sheet),
            );
            return None;
        }
    };
    let target = planned.destination.folder(&config.destinations);
    let folder = match store.move_file(workbook.id(), None, target) {
        Ok(()) => Some(target.to_string()),
        Err(err) => {
            error!(workbook = workbook.id(), folder = target, "failed to move workbook: {err}");
            diagnostics.push(
                ValidationIssue::error(
                    "BD011",
                    format!("Failed to move {} into {target}: {err}", planned.filename),
                )
                .in_sheet(sheet),
            );
            None
        }
    };
    Some(CreatedValueSet {
        filename: planned.filename.clone(),
        label: planned.label.clone(),
        kind: planned.kind,
        system: planned.system.clone(),
        workbook_id: workbook.id().to_string(),
        folder,
    })
}

/// Run [`build_sheet`] over the tabs of a source workbook.
///
/// An empty `tabs` selection means every tab, in workbook order. Requested
/// tabs that do not exist are reported and skipped.
pub fn build_workbook(
    store: &mut dyn GridStore,
    source_id: &str,
    config: &BuilderConfig,
    tabs: &[String],
) -> BuildSummary {
    let source = Workbook::open(&*store, source_id);
    let mut summary = BuildSummary {
        source: source.name().to_string(),
        ..BuildSummary::default()
    };
    if source.sheets().is_empty() {
        summary.diagnostics.push(ValidationIssue::error(
            "BD020",
            format!("Source workbook {source_id} has no readable tabs"),
        ));
        return summary;
    }

    let selected: Vec<&Sheet> = if tabs.is_empty() {
        source.sheets().iter().collect()
    } else {
        tabs.iter()
            .filter_map(|tab| {
                let sheet = source.sheet(tab);
                if sheet.is_none() {
                    summary.diagnostics.push(ValidationIssue::error(
                        "BD021",
                        format!("No tab named {tab} in {source_id}"),
                    ));
                }
                sheet
            })
            .collect()
    };
    info!(source = %summary.source, tabs = selected.len(), "building value sets");

    let mut pacer = Pacer::new(config.pause);
    for sheet in selected {
        pacer.next_item();
        let span = info_span!("tab", name = sheet.name());
        let _guard = span.enter();
        summary.sheets.push(build_sheet(store, sheet, config));
    }
    info!(created = summary.created_count(), "build finished");
    summary
}
