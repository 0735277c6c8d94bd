//! Logging through `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: store failures
//! - `warn`: recoverable anomalies (ambiguous columns, skipped tabs)
//! - `info`: per-workbook and per-tab progress
//! - `debug`: per-sheet and per-system detail
//! - `trace`: everything else

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const WORKSPACE_CRATES: [&str; 6] = [
    "vocab",
    "vocab_cli",
    "vocab_build",
    "vocab_ingest",
    "vocab_model",
    "vocab_sheets",
];

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` decide the filter when set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Include the module path.
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Write to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per line.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(config.with_target),
                )
                .init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                registry.with(layer).init();
            } else {
                registry.with(layer.without_time()).init();
            }
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            if config.with_timestamps {
                registry.with(layer).init();
            } else {
                registry.with(layer.without_time()).init();
            }
        }
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Filter at the configured level for workspace crates and `warn` for the
/// rest, unless `RUST_LOG` takes over.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    let level = config.level_filter.to_string().to_lowercase();
    let directives: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect();
    EnvFilter::new(format!("warn,{}", directives.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_names_workspace_crates() {
        let config = LogConfig {
            level_filter: LevelFilter::DEBUG,
            use_env_filter: false,
            ..LogConfig::default()
        };
        let filter = build_env_filter(&config).to_string();
        assert!(filter.contains("vocab_build=debug"), "{filter}");
        assert!(filter.contains("vocab_sheets=debug"), "{filter}");
    }
}
