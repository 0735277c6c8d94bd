//! `vocab` command-line entry point.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use vocab_cli::logging::{LogConfig, LogFormat, init_logging};
use vocab_cli::settings::Settings;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Session, run_build, run_check_statements, run_inspect, run_list_tabs, run_search,
};
use crate::summary::{
    print_build_summary, print_inspect, print_listing, print_search, print_statement_check,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(failed) => i32::from(failed),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Run the selected command. Returns whether any error-level issue was
/// reported.
fn run(cli: Cli) -> Result<bool> {
    let mut settings = Settings::discover(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        settings.store = store;
    }
    let mut session = Session::open(settings)?;
    match cli.command {
        Command::Build(args) => {
            let summary = run_build(&mut session, &args)?;
            print_build_summary(&summary);
            Ok(summary.has_errors())
        }
        Command::Inspect(args) => {
            let result = run_inspect(&session, &args);
            if args.json {
                let value_sets: Vec<_> = result
                    .value_sets
                    .iter()
                    .map(|parsed| {
                        serde_json::json!({
                            "value_set": parsed.value_set,
                            "issues": parsed.diagnostics.issues,
                        })
                    })
                    .collect();
                let output = serde_json::json!({
                    "value_sets": value_sets,
                    "issues": result.diagnostics.issues,
                });
                let text = serde_json::to_string_pretty(&output).context("render json")?;
                println!("{text}");
            } else {
                print_inspect(&result);
            }
            Ok(result.has_errors())
        }
        Command::ListTabs(args) => {
            let listing = run_list_tabs(&mut session, &args)?;
            print_listing(&listing);
            Ok(listing.diagnostics.has_errors())
        }
        Command::CheckStatements(args) => {
            let result = run_check_statements(&session, &args)?;
            print_statement_check(&result);
            Ok(result.diagnostics.has_errors())
        }
        Command::Search(args) => {
            print_search(&run_search(&session, &args)?);
            Ok(false)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
