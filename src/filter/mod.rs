//! Row filtering for the sales table
//!
//! The dashboard's only user filter is the product-line selection. It is
//! expressed as a `BatchFilter` over the Arrow batch so the row selection runs
//! through Arrow's vectorized kernels.

pub mod core;
pub mod product_line;

pub use self::core::{BatchFilter, filter_record_batch};
pub use product_line::{FilterOutcome, ProductLineFilter, ProductLineSelection, apply_selection};
