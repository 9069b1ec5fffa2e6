//! Terminal rendering of analysis results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use prepcheck_model::Severity;

use crate::commands::AnalyzeOutcome;

pub fn print_summary(outcome: &AnalyzeOutcome) {
    let result = &outcome.result;
    println!(
        "Issues: {} ({} critical, {} warnings)",
        result.total_issues, result.critical_count, result.warning_count
    );
    println!("Dataset hash: {}", result.dataset_hash);

    if !result.issues.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            header_cell("Severity"),
            header_cell("Check"),
            header_cell("Column"),
            header_cell("Description"),
        ]);
        for issue in &result.issues {
            table.add_row(vec![
                severity_cell(issue.severity),
                Cell::new(issue.category.as_str()),
                Cell::new(&issue.column),
                Cell::new(&issue.description),
            ]);
        }
        println!("{table}");
    }

    if !outcome.suggestions.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            header_cell("Priority"),
            header_cell("Fix"),
            header_cell("Columns"),
            header_cell("Reason"),
        ]);
        for fix in &outcome.suggestions {
            let mut priority = Cell::new(fix.priority.to_string());
            priority = priority.set_alignment(CellAlignment::Right);
            let action = match &fix.method {
                Some(method) => format!("{} ({method})", fix.fix_type),
                None => fix.fix_type.to_string(),
            };
            table.add_row(vec![
                priority,
                Cell::new(action),
                Cell::new(fix.columns.join(", ")),
                Cell::new(&fix.reason),
            ]);
        }
        println!("Suggested fixes:");
        println!("{table}");
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Critical => Cell::new("critical").fg(Color::Red),
        Severity::Warning => Cell::new("warning").fg(Color::Yellow),
    }
}
