use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use pbir_core::{ActionResult, ActionStatus, RunReport};
use pbir_transform::ActionDefinition;

pub fn print_summary(report: &RunReport, detailed: bool) {
    if report.dry_run {
        println!("Dry run: no files written");
    }
    println!("{}", summary_table(report));
    if detailed && report.change_count() > 0 {
        println!();
        println!("Changes:");
        println!("{}", changes_table(report));
    }
    for result in report.failed_actions() {
        if let ActionStatus::Failed { error, .. } = &result.status {
            eprintln!("- {error}");
        }
    }
}

/// One row per action plus a total row.
pub fn summary_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Action"),
        header_cell("Description"),
        header_cell("Status"),
        header_cell("Changed"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for result in &report.results {
        table.add_row(vec![
            Cell::new(&result.action)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&result.description),
            status_cell(result),
            count_cell(result.documents_changed),
        ]);
    }
    let verb = if report.dry_run { "would change" } else { "changed" };
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("Documents that {verb}"))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(report.changed_documents).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Every change record, in action order.
pub fn changes_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Action"),
        header_cell("Document"),
        header_cell("Change"),
    ]);
    apply_table_style(&mut table);
    for result in &report.results {
        for change in &result.changes {
            table.add_row(vec![
                Cell::new(&result.action),
                Cell::new(change.key.to_string()).fg(Color::DarkGrey),
                Cell::new(&change.description),
            ]);
        }
    }
    table
}

/// Resolved actions in run order.
pub fn actions_table(actions: &[ActionDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Action"),
        header_cell("Implementation"),
        header_cell("Scope"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, action) in actions.iter().enumerate() {
        let implementation = if action.implementation == action.name {
            dim_cell("-")
        } else {
            Cell::new(&action.implementation)
        };
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&action.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            implementation,
            Cell::new(action.scope),
            Cell::new(&action.description),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(result: &ActionResult) -> Cell {
    match result.status {
        ActionStatus::Completed => Cell::new("OK").fg(Color::Green),
        ActionStatus::Failed { .. } => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
