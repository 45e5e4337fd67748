//! Progress reporting while the dashboard panels render
//!
//! Uses the indicatif crate; bars are hidden when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Style of the panel progress bar
pub const PANEL_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Create the progress bar advanced once per rendered panel
///
/// # Arguments
/// * `length` - Number of panels
/// * `visible` - Draw to stderr; when false the bar is hidden
#[must_use]
pub fn create_panel_progress_bar(length: u64, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new(length);
    if !visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::default_bar().template(PANEL_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
