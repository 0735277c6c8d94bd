//! Sheets and workbooks backed by a [`GridStore`].
//!
//! All row and column indexes are 0-based.

pub mod error;
pub mod local;
pub mod memory;
pub mod sheet;
pub mod store;
pub mod workbook;

pub use error::{SheetError, StoreError, StoreResult};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use sheet::Sheet;
pub use store::{
    DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT, FileEntry, FileQuery, GridStore, SheetSpec,
};
pub use workbook::{Workbook, create_value_set_workbook};
