use crate::plan::{RenamePlan, SkipReason};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render a plan as a table of current and new names, followed by refused candidates
pub fn render_plan_table(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Current name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Current name", "New name", "Status"]);
    }

    let shared_targets: Vec<String> = plan
        .internal_collisions()
        .into_iter()
        .map(|(target, _)| target)
        .collect();

    for entry in &plan.entries {
        let (status, color) = if shared_targets.contains(&entry.target_name) {
            ("rename (shared target)", Color::Yellow)
        } else {
            ("rename", Color::Green)
        };
        table.add_row(vec![
            Cell::new(&entry.source_name),
            Cell::new(&entry.target_name),
            status_cell(status, color, use_color),
        ]);
    }

    for skip in &plan.skipped {
        let status = match skip.reason {
            SkipReason::TargetExists => "skip (target exists)",
            SkipReason::InvalidName => "skip (invalid name)",
        };
        table.add_row(vec![
            Cell::new(&skip.source_name),
            Cell::new(&skip.target_name),
            status_cell(status, Color::Red, use_color),
        ]);
    }

    table.to_string()
}

fn status_cell(text: &str, color: Color, use_color: bool) -> Cell {
    if use_color {
        Cell::new(text).fg(color)
    } else {
        Cell::new(text)
    }
}
