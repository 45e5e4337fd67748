//! Log lines for loading, filtering and rendering
//!
//! Every long-running step logs a start line and a completion line with the
//! number of items it handled, so a `RUST_LOG=info` run reads as a timeline.

use std::path::Path;
use std::time::Duration;

use crate::filter::ProductLineSelection;

/// Log the start of an operation on a file or directory
///
/// # Arguments
/// * `operation` - What is about to happen, e.g. "Loading sales data from"
/// * `path` - The file or directory involved
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation} {}", path.display());
}

/// Log the completion of an operation
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "loaded" or "rendered"
/// * `path` - The file or directory involved
/// * `items` - Rows or panels handled
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {operation} {items} items ({}) in {duration:.2?}",
            path.display()
        ),
        None => log::info!("Successfully {operation} {items} items ({})", path.display()),
    }
}

/// Log which product lines a cycle renders
pub fn log_selection(selection: &ProductLineSelection, catalog: &[String]) {
    match selection {
        ProductLineSelection::All => {
            log::info!("Rendering all {} product lines", catalog.len());
        }
        ProductLineSelection::Only(lines) if lines.is_empty() => {
            log::info!("No product line selected");
        }
        ProductLineSelection::Only(_) => {
            let known = selection.resolve(catalog);
            log::info!(
                "Rendering {} of {} product lines: {}",
                known.len(),
                catalog.len(),
                known.join(", ")
            );
        }
    }
}

/// Log a warning, optionally naming the path it concerns
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{message}: {}", path.display());
    } else {
        log::warn!("{message}");
    }
}
