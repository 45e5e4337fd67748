use std::path::{Path, PathBuf};

use sales_dashboard::utils::sample::{generate_records, write_csv};
use sales_dashboard::utils::test::temp_path;
use sales_dashboard::{DashboardConfig, Result, SalesRecord};

/// Rows in the generated test data set
pub const SAMPLE_ROWS: usize = 600;

/// Seed of the generated test data set
pub const SAMPLE_SEED: u64 = 2019;

/// Generated records behind `sample_csv`
#[must_use]
pub fn sample_records() -> Vec<SalesRecord> {
    generate_records(SAMPLE_ROWS, SAMPLE_SEED)
}

/// Write the generated data set as a month-first CSV under a fresh temp path
pub fn sample_csv(name: &str) -> Result<PathBuf> {
    let path = temp_path(&format!("{name}.csv"));
    write_csv(&path, &sample_records(), "%m/%d/%Y")?;
    Ok(path)
}

/// Config reading `data` and writing into a fresh temp directory
#[must_use]
pub fn test_config(data: &Path, name: &str) -> DashboardConfig {
    DashboardConfig::default()
        .with_data_path(data)
        .with_output_dir(temp_path(&format!("{name}_out")))
}

/// Rows of `records` whose product line is one of `lines`
#[must_use]
pub fn rows_in(records: &[SalesRecord], lines: &[&str]) -> usize {
    records
        .iter()
        .filter(|r| lines.contains(&r.product_line.as_str()))
        .count()
}
