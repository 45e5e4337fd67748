//! A Rust library for loading a supermarket sales table, filtering it by
//! product line and rendering it as a static analytical dashboard.

pub mod algorithm;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod reader;
pub mod render;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use models::{SalesRecord, SalesTable};
pub use schema::DateFormatConfig;

// Loading and filtering
pub use filter::{FilterOutcome, ProductLineSelection, apply_selection};
pub use reader::{DatasetCache, load_sales_table};

// Dashboard
pub use dashboard::{
    CycleOutcome, Dashboard, DashboardModel, DashboardReport, NO_SELECTION_MESSAGE, Panel,
    PanelOutput,
};
pub use render::ChartRenderer;

// Arrow types
pub use arrow::record_batch::RecordBatch;
