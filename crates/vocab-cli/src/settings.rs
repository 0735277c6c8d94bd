//! `vocab.toml` settings.
//!
//! ```toml
//! store = "vocab-store"
//! source = "code-lists"
//! target = "tab-listing"
//! target_sheet = "Sheet1"
//! statements = "statements"
//!
//! [builder]
//! header_rows = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use vocab_build::BuilderConfig;

pub const DEFAULT_SETTINGS_FILE: &str = "vocab.toml";
pub const DEFAULT_STORE_DIR: &str = "vocab-store";
pub const DEFAULT_TARGET_SHEET: &str = "Sheet1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root directory of the local grid store.
    pub store: PathBuf,
    /// Workbook id of the code-list source.
    pub source: Option<String>,
    /// Workbook id receiving the tab listing.
    pub target: Option<String>,
    pub target_sheet: String,
    /// Workbook id holding the Statements and Data Variables sheets.
    pub statements: Option<String>,
    pub builder: BuilderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE_DIR),
            source: None,
            target: None,
            target_sheet: DEFAULT_TARGET_SHEET.to_string(),
            statements: None,
            builder: BuilderConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text).context("parse settings")?;
        settings
            .builder
            .validate()
            .context("validate builder settings")?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load {}", path.display()))
    }

    /// Load an explicit settings file, else `vocab.toml` in the working
    /// directory when present, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_SETTINGS_FILE);
        if default_path.is_file() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }
}
