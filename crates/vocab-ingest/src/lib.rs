pub mod handles;
pub mod records;
pub mod statements;
pub mod value_set;

pub use handles::check_duplicate_handles;
pub use records::{Record, values_to_records};
pub use statements::{
    DATA_VARIABLES_SHEET, STATEMENTS_SHEET, StatementCheckOptions, check_statement_variables,
    check_statement_workbook,
};
pub use value_set::{ParsedValueSet, value_set_from_workbook};
