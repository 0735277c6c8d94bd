//! CLI argument definitions for `vocab`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vocab",
    version,
    about = "Build and inspect terminology value-set workbooks",
    long_about = "Build and inspect terminology value-set workbooks.\n\n\
                  Workbooks live in a local grid store: one directory per workbook,\n\
                  one CSV file per sheet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: ./vocab.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Grid store directory (overrides the settings file).
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build value-set workbooks from the code-list source workbook.
    Build(BuildArgs),

    /// Parse value-set workbooks and report what they contain.
    Inspect(InspectArgs),

    /// Copy the filename of every source tab into a listing sheet.
    ListTabs(ListTabsArgs),

    /// Check that ready statements reference ready data variables.
    CheckStatements(CheckStatementsArgs),

    /// Find workbooks by title.
    Search(SearchArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Source workbook id (overrides `source` in the settings file).
    #[arg(long = "source", value_name = "ID")]
    pub source: Option<String>,

    /// Build only this tab; repeat for several (default: every tab).
    #[arg(long = "tab", value_name = "NAME")]
    pub tabs: Vec<String>,

    /// Do not pause between batches of tabs.
    #[arg(long = "no-pause")]
    pub no_pause: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Workbook ids of the value sets.
    #[arg(value_name = "WORKBOOK_ID", required = true)]
    pub workbooks: Vec<String>,

    /// Print the parsed value sets and their issues as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ListTabsArgs {
    #[arg(long = "source", value_name = "ID")]
    pub source: Option<String>,

    /// Workbook receiving the listing.
    #[arg(long = "target", value_name = "ID")]
    pub target: Option<String>,

    /// Sheet of the target workbook to write into.
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    #[arg(long = "no-pause")]
    pub no_pause: bool,
}

#[derive(Parser)]
pub struct CheckStatementsArgs {
    /// Workbook with Statements and Data Variables sheets.
    #[arg(value_name = "WORKBOOK_ID")]
    pub workbook: Option<String>,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Case-insensitive substring of the workbook title.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Only workbooks in this folder.
    #[arg(long = "folder", value_name = "ID")]
    pub folder: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
