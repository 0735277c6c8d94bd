#![deny(unsafe_code)]

use std::path::PathBuf;

/// Lookup failures on an in-memory sheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("column {column} not found in sheet {sheet}")]
    ColumnNotFound { sheet: String, column: String },

    #[error("cell ({row}, {col}) is outside sheet {sheet}")]
    CellOutOfRange {
        sheet: String,
        row: usize,
        col: usize,
    },
}

/// Failures reported by a grid store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("workbook not found: {0}")]
    WorkbookNotFound(String),

    #[error("sheet {sheet} not found in workbook {workbook}")]
    SheetNotFound { workbook: String, sheet: String },

    #[error("sheet {sheet} already exists in workbook {workbook}")]
    SheetExists { workbook: String, sheet: String },

    #[error("workbook {workbook} was created but its sheets were not written: {source}")]
    Unfilled {
        workbook: String,
        #[source]
        source: Box<StoreError>,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid workbook manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
