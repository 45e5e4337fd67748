//! Five-number summaries for box plots.

use arrow::array::Array;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;

/// Whisker reach in multiples of the inter-quartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Box plot statistics of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub group: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value not below `q1 - 1.5 * IQR`
    pub lower_whisker: f64,
    /// Largest value not above `q3 + 1.5 * IQR`
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub mean: f64,
}

impl BoxStats {
    /// Statistics of a non-empty sample; `None` when no finite value is present
    #[must_use]
    pub fn from_values(group: impl Into<String>, values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
        let (lower_whisker, upper_whisker) = inside
            .fold(None, |acc: Option<(f64, f64)>, v| {
                Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
            })
            .unwrap_or((q1, q3));

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Some(Self {
            group: group.into(),
            count: sorted.len(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
            mean,
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    #[allow(clippy::cast_precision_loss)]
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let frac = pos - pos.floor();
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Box statistics of `value_column` per `group_column`, groups in first-appearance order
pub fn box_stats_by(
    table: &SalesTable,
    group_column: &str,
    value_column: &str,
) -> Result<Vec<BoxStats>> {
    let groups = table.utf8_column(group_column)?;
    let values = table.f64_column(value_column)?;

    let mut order: Vec<&str> = Vec::new();
    let mut samples: FxHashMap<&str, Vec<f64>> = FxHashMap::default();
    for row in 0..groups.len() {
        if groups.is_null(row) || values.is_null(row) {
            continue;
        }
        let group = groups.value(row);
        samples
            .entry(group)
            .or_insert_with(|| {
                order.push(group);
                Vec::new()
            })
            .push(values.value(row));
    }

    Ok(order
        .into_iter()
        .filter_map(|group| BoxStats::from_values(group, samples.get(group)?))
        .collect())
}
