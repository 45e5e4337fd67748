//! Paired values for scatter plots.

use arrow::array::Array;
use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;

/// (x, y) pairs of two numeric columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

impl ScatterSeries {
    /// Bounding box of the points as ((min x, max x), (min y, max y))
    #[must_use]
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        self.points.iter().fold(None, |acc, &(x, y)| {
            Some(match acc {
                None => ((x, x), (y, y)),
                Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
            })
        })
    }
}

/// One point per row where both columns hold a finite value
pub fn scatter_points(table: &SalesTable, x_column: &str, y_column: &str) -> Result<ScatterSeries> {
    let xs = table.f64_column(x_column)?;
    let ys = table.f64_column(y_column)?;
    let points = (0..xs.len())
        .filter(|&row| xs.is_valid(row) && ys.is_valid(row))
        .map(|row| (xs.value(row), ys.value(row)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    Ok(ScatterSeries {
        x_label: x_column.to_string(),
        y_label: y_column.to_string(),
        points,
    })
}
