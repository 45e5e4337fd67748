//! Aggregations behind the dashboard panels
//!
//! Each function derives one summary from a `SalesTable`. None of them keeps
//! state; the dashboard calls them once per render cycle.

pub mod boxplot;
pub mod consistency;
pub mod correlation;
pub mod grouping;
pub mod histogram;
pub mod scatter;
pub mod timeseries;

pub use boxplot::{BoxStats, box_stats_by};
pub use consistency::{ConsistencyReport, check_totals};
pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use grouping::{
    GroupTotal, PivotTable, ValueCount, pivot_sum, revenue_by_product_line, sum_by, value_counts,
};
pub use histogram::{Histogram, histogram};
pub use scatter::{ScatterSeries, scatter_points};
pub use timeseries::{DailyCount, transactions_per_day};
