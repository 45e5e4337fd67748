//! Checks that `Total` agrees with price, quantity and tax.

use serde::Serialize;

use crate::error::Result;
use crate::models::SalesTable;

/// Rows whose `Total` deviates from `Unit price × Quantity × (1 + tax)`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsistencyReport {
    /// Rows where every input was present
    pub checked: usize,
    /// Rows deviating beyond the tolerance
    pub mismatched: usize,
    pub max_abs_deviation: f64,
    /// Invoice ids of the first few mismatching rows
    pub examples: Vec<String>,
}

impl ConsistencyReport {
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.mismatched == 0
    }
}

const MAX_EXAMPLES: usize = 5;

/// Compare each row's `Total` against its recomputed value
///
/// Rows without unit price or quantity are not counted. Deviations are
/// reported, never corrected.
pub fn check_totals(table: &SalesTable, tax_rate: f64, tolerance: f64) -> Result<ConsistencyReport> {
    let mut report = ConsistencyReport::default();
    for record in table.records()? {
        let Some(expected) = record.expected_total(tax_rate) else {
            continue;
        };
        if record.total.is_nan() {
            continue;
        }
        report.checked += 1;
        let deviation = (record.total - expected).abs();
        report.max_abs_deviation = report.max_abs_deviation.max(deviation);
        if deviation > tolerance {
            report.mismatched += 1;
            if report.examples.len() < MAX_EXAMPLES {
                report.examples.push(record.invoice_id);
            }
        }
    }

    if !report.is_consistent() {
        log::warn!(
            "{} of {} rows have a Total that differs from price x quantity x (1 + {tax_rate}) by more than {tolerance}",
            report.mismatched,
            report.checked
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sample::{generate_records, records_to_batch};
    use crate::utils::test::{small_records, small_table};

    #[test]
    fn fixture_rows_are_consistent() {
        let report = check_totals(&small_table(), 0.05, 0.01).unwrap();
        assert_eq!(report.checked, 4);
        assert!(report.is_consistent());
        assert!(report.max_abs_deviation < 1e-6);
    }

    #[test]
    fn tampered_total_is_reported() {
        let mut records = small_records();
        records[2].total += 3.0;
        let table = SalesTable::try_new(records_to_batch(&records).unwrap()).unwrap();

        let report = check_totals(&table, 0.05, 0.01).unwrap();
        assert_eq!(report.mismatched, 1);
        assert_eq!(report.examples, vec![records[2].invoice_id.clone()]);
        assert!((report.max_abs_deviation - 3.0).abs() < 1e-6);
    }

    #[test]
    fn generated_data_passes() {
        let records = generate_records(250, 17);
        let table = SalesTable::try_new(records_to_batch(&records).unwrap()).unwrap();
        assert!(check_totals(&table, 0.05, 0.01).unwrap().is_consistent());
    }
}
