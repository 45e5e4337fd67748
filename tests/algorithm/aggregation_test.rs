use std::collections::HashMap;

use sales_dashboard::algorithm::{
    box_stats_by, histogram, pivot_sum, revenue_by_product_line, transactions_per_day,
    value_counts,
};
use sales_dashboard::schema;
use sales_dashboard::utils::sample::sample_table;

use crate::utils::{SAMPLE_ROWS, SAMPLE_SEED, sample_records};

#[test]
fn rating_histogram_covers_every_row() -> sales_dashboard::Result<()> {
    let table = sample_table(SAMPLE_ROWS, SAMPLE_SEED)?;
    let ratings = table.f64_values(schema::RATING)?;
    let hist = histogram(&ratings, 20);

    assert_eq!(hist.counts.len(), 20);
    assert_eq!(hist.edges.len(), 21);
    assert_eq!(hist.total(), SAMPLE_ROWS);
    let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!((hist.edges[0] - min).abs() < 1e-9);
    assert!((hist.edges[20] - max).abs() < 1e-9);
    Ok(())
}

#[test]
fn pivot_cells_match_row_sums() -> sales_dashboard::Result<()> {
    let table = sample_table(SAMPLE_ROWS, SAMPLE_SEED)?;
    let pivot = pivot_sum(&table, schema::BRANCH, schema::PRODUCT_LINE, schema::GROSS_INCOME)?;

    let mut expected: HashMap<(String, String), f64> = HashMap::new();
    for r in sample_records() {
        *expected.entry((r.branch, r.product_line)).or_default() += r.gross_income;
    }

    assert_eq!(pivot.row_labels, vec!["A", "B", "C"]);
    for branch in &pivot.row_labels {
        for line in &pivot.column_labels {
            let want = expected
                .get(&(branch.clone(), line.clone()))
                .copied()
                .unwrap_or(0.0);
            let got = pivot.get(branch, line).unwrap_or(f64::NAN);
            assert!((got - want).abs() < 1e-6, "{branch} / {line}: {got} != {want}");
        }
    }
    let total: f64 = expected.values().sum();
    assert!((pivot.grand_total() - total).abs() < 1e-6);
    Ok(())
}

#[test]
fn value_counts_match_records() -> sales_dashboard::Result<()> {
    let table = sample_table(SAMPLE_ROWS, SAMPLE_SEED)?;
    let counts = value_counts(&table, schema::PAYMENT)?;

    let mut expected: HashMap<String, usize> = HashMap::new();
    for r in sample_records() {
        *expected.entry(r.payment.to_string()).or_default() += 1;
    }
    assert_eq!(counts.len(), expected.len());
    for entry in &counts {
        assert_eq!(Some(&entry.count), expected.get(&entry.value));
    }
    Ok(())
}

#[test]
fn revenue_is_sorted_ascending_and_complete() -> sales_dashboard::Result<()> {
    let table = sample_table(SAMPLE_ROWS, SAMPLE_SEED)?;
    let revenue = revenue_by_product_line(&table)?;

    assert!(revenue.windows(2).all(|w| w[0].value <= w[1].value));
    let sum: f64 = revenue.iter().map(|g| g.value).sum();
    let expected: f64 = sample_records().iter().map(|r| r.total).sum();
    assert!((sum - expected).abs() < 1e-6);
    Ok(())
}

#[test]
fn daily_counts_are_ordered_by_date() -> sales_dashboard::Result<()> {
    let table = sample_table(SAMPLE_ROWS, SAMPLE_SEED)?;
    let days = transactions_per_day(&table)?;

    assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(days.iter().map(|d| d.count).sum::<usize>(), SAMPLE_ROWS);
    Ok(())
}

#[test]
fn box_stats_per_customer_type() -> sales_dashboard::Result<()> {
    let table = sample_table(SAMPLE_ROWS, SAMPLE_SEED)?;
    let boxes = box_stats_by(&table, schema::CUSTOMER_TYPE, schema::TOTAL)?;

    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes.iter().map(|b| b.count).sum::<usize>(), SAMPLE_ROWS);
    for b in &boxes {
        assert!(b.lower_whisker <= b.q1 && b.q1 <= b.median);
        assert!(b.median <= b.q3 && b.q3 <= b.upper_whisker);
    }
    Ok(())
}
