use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vocab_build::{BuildSummary, TabListing};
use vocab_model::{Diagnostics, IssueSeverity, ValidationIssue, ValueSetKind};
use vocab_sheets::FileEntry;

use crate::commands::{InspectResult, StatementResult};

pub fn print_build_summary(summary: &BuildSummary) {
    println!("Source: {}", summary.source);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tab"),
        header_cell("Value set"),
        header_cell("Kind"),
        header_cell("System"),
        header_cell("Workbook"),
        header_cell("Folder"),
    ]);
    apply_summary_table_style(&mut table);
    for report in &summary.sheets {
        if report.created.is_empty() {
            table.add_row(vec![
                tab_cell(&report.sheet),
                dim_cell("nothing built"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
        }
        for created in &report.created {
            table.add_row(vec![
                tab_cell(&report.sheet),
                Cell::new(&created.filename),
                kind_cell(created.kind),
                Cell::new(created.system.as_deref().unwrap_or("-")),
                Cell::new(&created.workbook_id),
                match &created.folder {
                    Some(folder) => Cell::new(folder),
                    None => Cell::new("not moved").fg(Color::Red),
                },
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} value sets", summary.created_count())).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_issues(&summary.all_issues());
}

pub fn print_inspect(result: &InspectResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Workbook"),
        header_cell("Handle"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Content"),
        header_cell("Members"),
        header_cell("Subsets"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 5..9 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    let mut issues = result.diagnostics.clone();
    for parsed in &result.value_sets {
        let value_set = &parsed.value_set;
        table.add_row(vec![
            Cell::new(&value_set.info.short_name),
            Cell::new(&value_set.handle),
            Cell::new(&value_set.label),
            value_set.kind.map_or_else(|| dim_cell("-"), kind_cell),
            Cell::new(value_set.effective_content_type()),
            Cell::new(value_set.members.len()),
            Cell::new(value_set.subsets.len()),
            count_cell(parsed.diagnostics.error_count(), Color::Red),
            count_cell(parsed.diagnostics.warning_count(), Color::Yellow),
        ]);
        issues.extend(parsed.diagnostics.clone());
    }
    println!("{table}");
    print_issues(&issues);
}

pub fn print_listing(listing: &TabListing) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Row"), header_cell("Tab"), header_cell("Filename")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (row, (tab, filename)) in listing.entries.iter().enumerate() {
        let filename = if filename.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(filename)
        };
        table.add_row(vec![Cell::new(row), tab_cell(tab), filename]);
    }
    println!("{table}");
    print_issues(&listing.diagnostics);
}

pub fn print_statement_check(result: &StatementResult) {
    println!("Statements: {}", result.workbook);
    if result.diagnostics.is_empty() {
        println!("Every ready statement references a ready data variable.");
    }
    print_issues(&result.diagnostics);
}

pub fn print_search(entries: &[FileEntry]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Workbook"), header_cell("Title")]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![Cell::new(&entry.id), Cell::new(&entry.name)]);
    }
    println!("{table}");
}

/// Issue table, errors first.
pub fn print_issues(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    let mut issues: Vec<&ValidationIssue> = diagnostics.issues.iter().collect();
    issues.sort_by_key(|issue| (severity_rank(issue.severity), issue.sheet.clone(), issue.code.clone()));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Sheet"),
        header_cell("Code"),
        header_cell("Count"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.sheet.as_deref().unwrap_or("-")),
            Cell::new(&issue.code),
            match issue.count {
                Some(count) => Cell::new(count).fg(severity_color(issue.severity)),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(200);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn tab_cell(tab: &str) -> Cell {
    Cell::new(tab)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: ValueSetKind) -> Cell {
    match kind {
        ValueSetKind::Extensional => Cell::new(kind),
        ValueSetKind::Intensional => Cell::new(kind).fg(Color::Magenta),
        ValueSetKind::Grouping => Cell::new(kind).fg(Color::Green),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
