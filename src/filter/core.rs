//! Core filtering functionality
//!
//! Defines the `BatchFilter` trait and the mask application shared by every
//! filter over Arrow record batches.

use std::collections::HashSet;

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::RecordBatch;

use crate::error::{DashboardError, Result};

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep; null counts as false
///
/// # Returns
/// A new record batch with only rows where mask is true
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    if batch.num_rows() != mask.len() {
        return Err(DashboardError::Arrow(arrow::error::ArrowError::InvalidArgumentError(
            format!(
                "Mask length ({}) doesn't match batch row count ({})",
                mask.len(),
                batch.num_rows()
            ),
        )));
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<arrow::error::Result<_>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Fail with `MissingColumn` for the first name in `required` absent from `batch`
pub fn ensure_columns(batch: &RecordBatch, required: &HashSet<String>) -> Result<()> {
    let schema = batch.schema();
    let mut missing = required
        .iter()
        .filter(|name| schema.index_of(name).is_err())
        .collect::<Vec<_>>();
    missing.sort();
    match missing.first() {
        Some(name) => Err(DashboardError::MissingColumn((*name).clone())),
        None => Ok(()),
    }
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Compute the keep-mask for a batch
    fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray>;

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> HashSet<String>;

    /// Filter a record batch after checking it carries every required column
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        ensure_columns(batch, &self.required_columns())?;
        let mask = self.mask(batch)?;
        filter_record_batch(batch, &mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test::small_table;

    #[test]
    fn mask_length_must_match() {
        let table = small_table();
        let mask = BooleanArray::from(vec![true, false]);
        assert!(filter_record_batch(table.batch(), &mask).is_err());
    }

    #[test]
    fn null_mask_entries_drop_rows() {
        let table = small_table();
        let mask = BooleanArray::from(vec![Some(true), None, Some(false), Some(true)]);
        let filtered = filter_record_batch(table.batch(), &mask).unwrap();
        assert_eq!(filtered.num_rows(), 2);
    }

    #[derive(Debug)]
    struct KeepAllNeedingRating;

    impl BatchFilter for KeepAllNeedingRating {
        fn mask(&self, batch: &RecordBatch) -> Result<BooleanArray> {
            Ok(BooleanArray::from(vec![true; batch.num_rows()]))
        }

        fn required_columns(&self) -> HashSet<String> {
            HashSet::from([crate::schema::RATING.to_string()])
        }
    }

    #[test]
    fn required_columns_are_checked_before_masking() {
        let table = small_table();
        let batch = table.batch();
        assert_eq!(KeepAllNeedingRating.filter(batch).unwrap().num_rows(), 4);

        let keep = (0..batch.num_columns())
            .filter(|&i| batch.schema().field(i).name() != crate::schema::RATING)
            .collect::<Vec<_>>();
        let without_rating = batch.project(&keep).unwrap();
        let err = KeepAllNeedingRating.filter(&without_rating).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == crate::schema::RATING));
    }
}
