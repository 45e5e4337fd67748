//! Transactions per calendar day.

use std::collections::BTreeMap;

use arrow::array::Array;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::SalesTable;
use crate::schema::date32_to_naive;

/// Number of transactions on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Count rows per date, ascending by date
pub fn transactions_per_day(table: &SalesTable) -> Result<Vec<DailyCount>> {
    let dates = table.date_column()?;
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for row in 0..dates.len() {
        if dates.is_null(row) {
            continue;
        }
        let days = dates.value(row);
        let date = date32_to_naive(days).ok_or_else(|| DashboardError::DateParse {
            row,
            value: days.to_string(),
        })?;
        *per_day.entry(date).or_default() += 1;
    }

    Ok(per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect())
}
