pub mod diagnostics;
pub mod enums;
pub mod error;
pub mod handle;
pub mod value_set;

pub use diagnostics::{Diagnostics, IssueSeverity, ValidationIssue};
pub use enums::{ContentType, ValueSetKind};
pub use error::{Result, VocabError};
pub use handle::handlify;
pub use value_set::{
    CONCEPT_COLUMNS, Concept, DESCRIPTION_SHEET, DRUG_COLUMNS, Documentation, InfoDetail,
    SUBSET_COLUMNS, TERM_CONTEXT_GENERIC_NAME, TERM_CONTEXT_TRADE_NAME, Term, ValueSet,
    ValueSetInfo, ValueSetSheets, VsReference, keys,
};
