//! Builder configuration.
//!
//! The coding-system table, folder destinations and pause policy are an
//! explicit value handed to the builder. [`BuilderConfig::default`] is the
//! standard code-list layout; a TOML file can replace any part of it:
//!
//! ```toml
//! header_rows = 2
//!
//! [destinations]
//! value_sets = "staging"
//! intensional = "intensional"
//! groupings = "staging"
//!
//! [[systems]]
//! key = "icd"
//! header = "ICD10"
//! suffix = " (ICD-10)"
//! system = "ICD-10"
//! columns = { code = 2, label = 3 }
//! content_type = "concepts"
//! rule = "wildcard-intent"
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use vocab_model::ContentType;

use crate::error::{BuildError, Result};

/// Source columns of one coding system (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPair {
    pub code: usize,
    pub label: usize,
}

/// How a coding system's pairs become a value set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemRule {
    /// One concept per pair.
    #[default]
    Plain,
    /// The code column holds generic drug names and the label column holds
    /// the drug category.
    GenericNames,
    /// Codes containing a `.x` wildcard turn the set into an intensional
    /// one whose intent lists every code.
    WildcardIntent,
    /// Skip the system unless at least one code is present.
    RequireCodes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingSystem {
    /// Short identifier used in logs (e.g., "icd").
    pub key: String,
    /// Substring identifying the system's column in the header row.
    pub header: String,
    /// Appended to the source Filename and Label.
    pub suffix: String,
    /// Value of the System column (e.g., "ICD-10").
    pub system: String,
    pub columns: ColumnPair,
    pub content_type: ContentType,
    #[serde(default)]
    pub rule: SystemRule,
}

impl CodingSystem {
    fn new(
        key: &str,
        header: &str,
        suffix: &str,
        system: &str,
        columns: (usize, usize),
        content_type: ContentType,
        rule: SystemRule,
    ) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            suffix: suffix.to_string(),
            system: system.to_string(),
            columns: ColumnPair {
                code: columns.0,
                label: columns.1,
            },
            content_type,
            rule,
        }
    }
}

/// Folders created workbooks are moved into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destinations {
    pub value_sets: String,
    pub intensional: String,
    pub groupings: String,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            value_sets: "staging".to_string(),
            intensional: "intensional".to_string(),
            groupings: "staging".to_string(),
        }
    }
}

/// Fixed pause between batches of tabs, to stay under request quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausePolicy {
    /// Tabs per batch; 0 disables pausing.
    pub every: usize,
    pub seconds: u64,
}

impl PausePolicy {
    pub fn none() -> Self {
        Self {
            every: 0,
            seconds: 0,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::from_secs(self.seconds)
    }
}

impl Default for PausePolicy {
    fn default() -> Self {
        Self {
            every: 59,
            seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Rows above the data; the last one is the coding-system header row.
    pub header_rows: usize,
    /// Metadata is read from rows before this index only.
    pub metadata_row_cap: Option<usize>,
    pub destinations: Destinations,
    pub pause: PausePolicy,
    pub systems: Vec<CodingSystem>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        use ContentType::{Concepts, Drugs};
        use SystemRule::{GenericNames, Plain, RequireCodes, WildcardIntent};
        Self {
            header_rows: 2,
            metadata_row_cap: None,
            destinations: Destinations::default(),
            pause: PausePolicy::default(),
            systems: vec![
                CodingSystem::new("icd", "ICD10", " (ICD-10)", "ICD-10", (2, 3), Concepts, WildcardIntent),
                CodingSystem::new("medcode", "Medcode", " (MEDCODE)", "MEDCODE", (4, 7), Concepts, Plain),
                CodingSystem::new("snomed", "SNOMED", " (SNOMED)", "SNOMED", (5, 6), Concepts, Plain),
                CodingSystem::new("opcs", "OPCS", " (OPCS)", "OPCS", (8, 9), Concepts, Plain),
                CodingSystem::new("dmd_pid", "Prod", " (DMD_PID)", "DMDPID", (10, 12), Drugs, RequireCodes),
                CodingSystem::new("dmd", "DMD", " (DMD)", "DMD", (11, 12), Drugs, RequireCodes),
                CodingSystem::new("name", "Generic", " (Name)", "", (13, 14), Drugs, GenericNames),
            ],
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Row index of the coding-system header row.
    pub fn header_row(&self) -> usize {
        self.header_rows - 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.header_rows == 0 {
            return Err(BuildError::invalid("header_rows must be at least 1"));
        }
        let mut keys = BTreeSet::new();
        for system in &self.systems {
            if !keys.insert(system.key.as_str()) {
                return Err(BuildError::invalid(format!(
                    "duplicate coding system key: {}",
                    system.key
                )));
            }
            if system.header.is_empty() {
                return Err(BuildError::invalid(format!(
                    "coding system {} has an empty header",
                    system.key
                )));
            }
            if system.columns.code == system.columns.label {
                return Err(BuildError::invalid(format!(
                    "coding system {} uses column {} for both code and label",
                    system.key, system.columns.code
                )));
            }
        }
        Ok(())
    }
}
