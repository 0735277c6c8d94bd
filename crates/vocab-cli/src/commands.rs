use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use vocab_build::{BuildSummary, PausePolicy, TabListing, build_workbook, list_tab_filenames};
use vocab_cli::settings::Settings;
use vocab_ingest::{
    ParsedValueSet, StatementCheckOptions, check_duplicate_handles, check_statement_workbook,
    value_set_from_workbook,
};
use vocab_model::{Diagnostics, ValueSet};
use vocab_sheets::{FileEntry, FileQuery, GridStore, LocalStore, Workbook};

use crate::cli::{BuildArgs, CheckStatementsArgs, InspectArgs, ListTabsArgs, SearchArgs};

/// Settings and the store they point at.
pub struct Session {
    pub settings: Settings,
    pub store: LocalStore,
}

impl Session {
    pub fn open(settings: Settings) -> Result<Self> {
        let store = LocalStore::open(&settings.store)
            .with_context(|| format!("open store {}", settings.store.display()))?;
        info!(store = %settings.store.display(), "store opened");
        Ok(Self { settings, store })
    }
}

pub struct InspectResult {
    pub value_sets: Vec<ParsedValueSet>,
    /// Issues across the whole selection (duplicate handles).
    pub diagnostics: Diagnostics,
}

impl InspectResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors() || self.value_sets.iter().any(|parsed| !parsed.is_ok())
    }
}

pub struct StatementResult {
    pub workbook: String,
    pub diagnostics: Diagnostics,
}

pub fn run_build(session: &mut Session, args: &BuildArgs) -> Result<BuildSummary> {
    let source = required(args.source.as_ref(), session.settings.source.as_ref(), "source")?;
    let mut config = session.settings.builder.clone();
    if args.no_pause {
        config.pause = PausePolicy::none();
    }
    let span = info_span!("build", source = %source);
    let _guard = span.enter();
    Ok(build_workbook(&mut session.store, &source, &config, &args.tabs))
}

pub fn run_inspect(session: &Session, args: &InspectArgs) -> InspectResult {
    let value_sets: Vec<ParsedValueSet> = args
        .workbooks
        .iter()
        .map(|id| value_set_from_workbook(&Workbook::open(&session.store, id)))
        .collect();
    let sets: Vec<ValueSet> = value_sets
        .iter()
        .map(|parsed| parsed.value_set.clone())
        .collect();
    InspectResult {
        diagnostics: check_duplicate_handles(&sets),
        value_sets,
    }
}

pub fn run_list_tabs(session: &mut Session, args: &ListTabsArgs) -> Result<TabListing> {
    let settings = &session.settings;
    let source = required(args.source.as_ref(), settings.source.as_ref(), "source")?;
    let target = required(args.target.as_ref(), settings.target.as_ref(), "target")?;
    let sheet = args
        .sheet
        .clone()
        .unwrap_or_else(|| settings.target_sheet.clone());
    let pause = if args.no_pause {
        PausePolicy::none()
    } else {
        settings.builder.pause
    };
    Ok(list_tab_filenames(
        &mut session.store,
        &source,
        &target,
        &sheet,
        pause,
    ))
}

pub fn run_check_statements(
    session: &Session,
    args: &CheckStatementsArgs,
) -> Result<StatementResult> {
    let id = required(
        args.workbook.as_ref(),
        session.settings.statements.as_ref(),
        "statements",
    )?;
    let workbook = Workbook::open(&session.store, &id);
    let diagnostics = check_statement_workbook(&workbook, &StatementCheckOptions::default());
    Ok(StatementResult {
        workbook: workbook.name().to_string(),
        diagnostics,
    })
}

pub fn run_search(session: &Session, args: &SearchArgs) -> Result<Vec<FileEntry>> {
    let mut query = FileQuery::name_contains(args.text.as_str());
    if let Some(folder) = &args.folder {
        query = query.in_folder(folder.as_str());
    }
    session.store.search_files(&query).context("search store")
}

/// Flag value, else settings value, else an error naming the setting.
fn required(flag: Option<&String>, setting: Option<&String>, name: &str) -> Result<String> {
    flag.or(setting)
        .cloned()
        .ok_or_else(|| anyhow!("no {name} workbook given; pass one or set `{name}` in vocab.toml"))
}
