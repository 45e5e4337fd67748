//! Console output for the command line
//!
//! Plain `println!` output meant for the user, as opposed to the log lines
//! that go to stderr.

use crate::dashboard::CycleOutcome;
use crate::filter::ProductLineSelection;
use crate::models::SalesTable;

/// Print the product-line options with their selection state
pub fn print_product_lines(catalog: &[String], selection: &ProductLineSelection) {
    println!("Product lines:");
    for line in catalog {
        let mark = if selection.contains(line) { 'x' } else { ' ' };
        println!("  [{mark}] {line}");
    }
}

/// Print row count and column types of the loaded table
pub fn print_table_summary(table: &SalesTable) {
    println!("Loaded {} rows", table.num_rows());
    println!("Schema:");
    for field in table.schema().fields() {
        println!("  - {} ({})", field.name(), field.data_type());
    }
}

/// Print where a render cycle put its output
pub fn print_cycle_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::NoSelection { message, index_path } => {
            println!("{message}");
            println!("Page: {}", index_path.display());
        }
        CycleOutcome::Rendered(report) => {
            println!(
                "Rendered {} panels from {} of {} rows",
                report.panels.len(),
                report.model.selected_rows,
                report.model.total_rows
            );
            for panel in &report.panels {
                println!("  {}. {} -> {}", panel.number, panel.title, panel.svg_path.display());
            }
            println!("Page: {}", report.index_path.display());
            if let Some(summary) = &report.summary_path {
                println!("Summary: {}", summary.display());
            }
            if !report.model.consistency.is_consistent() {
                println!(
                    "Warning: {} rows have an inconsistent Total",
                    report.model.consistency.mismatched
                );
            }
        }
    }
}
