//! Cross-check statements against the data variables they use.
//!
//! Both sheets start with a block of header rows. Rows are only considered
//! when their status column reads `ready`.

use std::collections::BTreeSet;

use tracing::{debug, info};

use vocab_model::{Diagnostics, ValidationIssue};
use vocab_sheets::{Sheet, Workbook};

pub const STATEMENTS_SHEET: &str = "Statements";
pub const DATA_VARIABLES_SHEET: &str = "Data Variables";

const STATUS_COL: usize = 0;
const DATA_VARIABLE_HANDLE_COL: usize = 1;
const STATEMENT_HANDLE_COL: usize = 3;
const STATEMENT_VARIABLE_COL: usize = 6;

#[derive(Debug, Clone)]
pub struct StatementCheckOptions {
    pub statement_header_rows: usize,
    pub variable_header_rows: usize,
    /// Namespace a statement may leave off its data-variable handle.
    pub namespace_prefix: String,
    pub ready_status: String,
}

impl Default for StatementCheckOptions {
    fn default() -> Self {
        Self {
            statement_header_rows: 3,
            variable_header_rows: 3,
            namespace_prefix: "nvdnc-ns::".to_string(),
            ready_status: "ready".to_string(),
        }
    }
}

/// Every ready statement whose data variable is not defined (with or
/// without the namespace prefix) yields one issue.
pub fn check_statement_variables(
    statements: &Sheet,
    variables: &Sheet,
    options: &StatementCheckOptions,
) -> Diagnostics {
    let mut defined = BTreeSet::new();
    for row in options.variable_header_rows..variables.rows() {
        if cell(variables, row, STATUS_COL) == options.ready_status {
            defined.insert(cell(variables, row, DATA_VARIABLE_HANDLE_COL));
        }
    }
    debug!(count = defined.len(), "ready data variables");

    let mut diagnostics = Diagnostics::default();
    for row in options.statement_header_rows..statements.rows() {
        if cell(statements, row, STATUS_COL) != options.ready_status {
            continue;
        }
        let variable = cell(statements, row, STATEMENT_VARIABLE_COL);
        let prefixed = format!("{}{variable}", options.namespace_prefix);
        if defined.contains(variable) || defined.contains(prefixed.as_str()) {
            continue;
        }
        let statement = cell(statements, row, STATEMENT_HANDLE_COL);
        diagnostics.push(
            ValidationIssue::error(
                "ST001",
                format!("Data variable {variable} not found (statement {statement})"),
            )
            .in_sheet(statements.name()),
        );
    }
    info!(issues = diagnostics.issues.len(), "statement check finished");
    diagnostics
}

/// Run [`check_statement_variables`] on the two standard sheets of a workbook.
pub fn check_statement_workbook(
    workbook: &Workbook,
    options: &StatementCheckOptions,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();
    let statements = workbook.sheet(STATEMENTS_SHEET);
    let variables = workbook.sheet(DATA_VARIABLES_SHEET);
    for (name, present) in [
        (STATEMENTS_SHEET, statements.is_some()),
        (DATA_VARIABLES_SHEET, variables.is_some()),
    ] {
        if !present {
            diagnostics.push(
                ValidationIssue::error(
                    "ST002",
                    format!("No {name} sheet in file: {}", workbook.name()),
                )
                .in_sheet(workbook.name()),
            );
        }
    }
    if let (Some(statements), Some(variables)) = (statements, variables) {
        diagnostics.extend(check_statement_variables(statements, variables, options));
    }
    diagnostics
}

fn cell(sheet: &Sheet, row: usize, col: usize) -> &str {
    sheet.cell(row, col).unwrap_or_default()
}
