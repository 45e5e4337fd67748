//! Pearson correlation matrix over the measure columns.

use arrow::array::Array;
use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;
use crate::schema;

/// Square, symmetric correlation matrix with a unit diagonal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` is the correlation of `columns[i]` and `columns[j]`;
    /// `NaN` when fewer than two complete pairs exist
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient by column names
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Numeric columns that carry a measure and vary
///
/// Identifier, categorical, date and time columns are skipped even when they
/// happen to be numeric, and so is any column with zero variance.
pub fn measure_columns(table: &SalesTable) -> Result<Vec<String>> {
    let mut columns = Vec::new();
    for name in table.numeric_column_names() {
        if schema::NON_MEASURE_COLUMNS.contains(&name.as_str()) {
            continue;
        }
        let values = table.f64_values(&name)?;
        if variance(&values).is_some_and(|v| v > 0.0) {
            columns.push(name);
        } else {
            log::debug!("Dropping constant column '{name}' from the correlation matrix");
        }
    }
    Ok(columns)
}

/// Pairwise Pearson correlation of the measure columns
pub fn correlation_matrix(table: &SalesTable) -> Result<CorrelationMatrix> {
    let columns = measure_columns(table)?;
    let data = columns
        .iter()
        .map(|name| table.f64_column(name))
        .collect::<Result<Vec<_>>>()?;

    let n = columns.len();
    let mut values = vec![vec![1.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let pairs = (0..table.num_rows())
                .filter(|&row| data[i].is_valid(row) && data[j].is_valid(row))
                .map(|row| (data[i].value(row), data[j].value(row)));
            let r = pearson(pairs).unwrap_or(f64::NAN);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0))
}

/// Pearson coefficient of complete pairs, clamped to [-1, 1]
fn pearson(pairs: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = pairs.collect();
    if pairs.len() < 2 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
