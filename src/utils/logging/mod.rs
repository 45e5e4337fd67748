//! Logging utilities for output and progress tracking
//!
//! Log helpers for the load and render steps, user-facing console output and
//! the progress bar drawn while panels render.

pub mod console;
pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_selection, log_warning};
pub use progress::{create_panel_progress_bar, finish_progress_bar};
