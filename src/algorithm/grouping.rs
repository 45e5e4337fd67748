//! Grouped sums, value counts and the two-key pivot.

use arrow::array::Array;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;
use crate::schema;

/// Sum of a measure for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

/// Occurrences of one categorical value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    /// Share of all counted rows, 0..=100
    pub percent: f64,
}

/// Two-key grouped sum, rows × columns, absent combinations filled with 0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// `values[row][column]`
    pub values: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Cell by labels
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        Some(self.values[r][c])
    }

    /// Sum of one row (height of a stacked bar)
    #[must_use]
    pub fn row_total(&self, row: usize) -> f64 {
        self.values.get(row).map_or(0.0, |cells| cells.iter().sum())
    }

    #[must_use]
    pub fn grand_total(&self) -> f64 {
        (0..self.row_labels.len()).map(|r| self.row_total(r)).sum()
    }
}

/// Sum `value_column` per distinct `key_column`, groups in first-appearance order
///
/// Rows with a null key or value are skipped.
pub fn sum_by(table: &SalesTable, key_column: &str, value_column: &str) -> Result<Vec<GroupTotal>> {
    let keys = table.utf8_column(key_column)?;
    let values = table.f64_column(value_column)?;

    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<GroupTotal> = Vec::new();
    for row in 0..keys.len() {
        if keys.is_null(row) || values.is_null(row) {
            continue;
        }
        let key = keys.value(row);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(GroupTotal {
                key: key.to_string(),
                value: 0.0,
            });
            groups.len() - 1
        });
        groups[slot].value += values.value(row);
    }
    Ok(groups)
}

/// Revenue (`Total`) per product line, ascending
pub fn revenue_by_product_line(table: &SalesTable) -> Result<Vec<GroupTotal>> {
    let mut totals = sum_by(table, schema::PRODUCT_LINE, schema::TOTAL)?;
    totals.sort_by(|a, b| a.value.total_cmp(&b.value));
    Ok(totals)
}

/// Count rows per value of a text column, most frequent first
pub fn value_counts(table: &SalesTable, column: &str) -> Result<Vec<ValueCount>> {
    let values = table.utf8_column(column)?;
    let counts = values.iter().flatten().counts();
    let counted: usize = counts.values().sum();

    // Ties keep first-appearance order
    let order = values.iter().flatten().unique().collect::<Vec<_>>();
    let mut result = order
        .into_iter()
        .map(|value| {
            let count = counts.get(value).copied().unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let percent = if counted == 0 {
                0.0
            } else {
                count as f64 * 100.0 / counted as f64
            };
            ValueCount {
                value: value.to_string(),
                count,
                percent,
            }
        })
        .collect::<Vec<_>>();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(result)
}

/// Sum `value_column` per (`row_column`, `column_column`) and lay it out wide
///
/// Row and column labels are sorted, as a grouped index would be.
pub fn pivot_sum(
    table: &SalesTable,
    row_column: &str,
    column_column: &str,
    value_column: &str,
) -> Result<PivotTable> {
    let rows = table.utf8_column(row_column)?;
    let cols = table.utf8_column(column_column)?;
    let values = table.f64_column(value_column)?;

    let mut sums: FxHashMap<(&str, &str), f64> = FxHashMap::default();
    for i in 0..rows.len() {
        if rows.is_null(i) || cols.is_null(i) || values.is_null(i) {
            continue;
        }
        *sums.entry((rows.value(i), cols.value(i))).or_default() += values.value(i);
    }

    let row_labels = sums.keys().map(|(r, _)| *r).unique().sorted().collect::<Vec<_>>();
    let column_labels = sums.keys().map(|(_, c)| *c).unique().sorted().collect::<Vec<_>>();
    let values = row_labels
        .iter()
        .map(|r| {
            column_labels
                .iter()
                .map(|c| sums.get(&(*r, *c)).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    Ok(PivotTable {
        row_labels: row_labels.into_iter().map(str::to_string).collect(),
        column_labels: column_labels.into_iter().map(str::to_string).collect(),
        values,
    })
}
