//! Turn code-list source sheets into value-set workbooks.
//!
//! Each source sheet carries a metadata block (labels in column 0, values in
//! column 1) and one pair of code/label columns per coding system. For every
//! coding system present the builder writes one value-set workbook, then one
//! grouping workbook that references them all.

pub mod builder;
pub mod codes;
pub mod config;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod pace;
pub mod plan;
pub mod tabs;

pub use builder::{BuildSummary, CreatedValueSet, SheetReport, build_sheet, build_workbook};
pub use codes::{CodePair, clean_cell, dedupe_pairs, has_wildcard, repair_scientific_notation};
pub use config::{BuilderConfig, CodingSystem, ColumnPair, Destinations, PausePolicy, SystemRule};
pub use error::{BuildError, Result};
pub use extract::{extract_code_pairs, find_indices, locate_system, sheet_headers};
pub use metadata::{Metadata, extract_metadata, value_set_type_for_filename};
pub use pace::Pacer;
pub use plan::{Destination, PlannedValueSet, SheetPlan, plan_sheet};
pub use tabs::{TabListing, list_tab_filenames};
