//! Synthetic sales data
//!
//! Generates seeded, reproducible sales records with the full column set and
//! turns them into Arrow batches or CSV files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::{CustomerType, PaymentMethod, SalesRecord, SalesTable};
use crate::schema::{self, naive_to_date32};

/// Product line catalog of the supermarket
pub const PRODUCT_LINES: &[&str] = &[
    "Health and beauty",
    "Electronic accessories",
    "Home and lifestyle",
    "Sports and travel",
    "Food and beverages",
    "Fashion accessories",
];

const BRANCHES: &[(&str, &str)] = &[("A", "Yangon"), ("B", "Mandalay"), ("C", "Naypyitaw")];
const PAYMENTS: &[&str] = &["Ewallet", "Cash", "Credit card"];
const GROSS_MARGIN_PCT: f64 = 4.761_904_762;

/// Column order of the source file
pub const CSV_HEADER: &[&str] = &[
    schema::INVOICE_ID,
    schema::BRANCH,
    schema::CITY,
    schema::CUSTOMER_TYPE,
    schema::GENDER,
    schema::PRODUCT_LINE,
    schema::UNIT_PRICE,
    schema::QUANTITY,
    schema::TAX,
    schema::TOTAL,
    schema::DATE,
    schema::TIME,
    schema::PAYMENT,
    schema::COGS,
    schema::GROSS_MARGIN_PCT,
    schema::GROSS_INCOME,
    schema::RATING,
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate `rows` records between 2019-01-01 and 2019-03-31
#[must_use]
pub fn generate_records(rows: usize, seed: u64) -> Vec<SalesRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default();

    (0..rows)
        .map(|i| {
            let (branch, city) = BRANCHES[rng.random_range(0..BRANCHES.len())];
            let unit_price = round2(rng.random_range(10.0..100.0));
            let quantity = f64::from(rng.random_range(1_u32..=10));
            let cogs = round2(unit_price * quantity);
            let tax = cogs * 0.05;
            let customer = if rng.random_bool(0.5) { "Member" } else { "Normal" };

            SalesRecord {
                invoice_id: format!(
                    "{:03}-{:02}-{:04}",
                    rng.random_range(100..1000),
                    rng.random_range(10..100),
                    i % 10_000
                ),
                branch: branch.to_string(),
                city: city.to_string(),
                customer_type: CustomerType::from(customer),
                gender: if rng.random_bool(0.5) { "Female" } else { "Male" }.to_string(),
                product_line: PRODUCT_LINES[rng.random_range(0..PRODUCT_LINES.len())].to_string(),
                unit_price,
                quantity,
                tax,
                total: cogs + tax,
                date: start + Duration::days(rng.random_range(0..89)),
                time: format!(
                    "{:02}:{:02}",
                    rng.random_range(10..21),
                    rng.random_range(0..60)
                ),
                payment: PaymentMethod::from(PAYMENTS[rng.random_range(0..PAYMENTS.len())]),
                cogs,
                gross_margin_percentage: GROSS_MARGIN_PCT,
                gross_income: tax,
                rating: f64::from(rng.random_range(40_u32..=100)) / 10.0,
            }
        })
        .collect()
}

/// Build an Arrow batch with the loader's column layout from typed records
pub fn records_to_batch(records: &[SalesRecord]) -> Result<RecordBatch> {
    let text = |f: fn(&SalesRecord) -> String| -> ArrayRef {
        Arc::new(records.iter().map(f).map(Some).collect::<StringArray>())
    };
    let number = |f: fn(&SalesRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let fields = CSV_HEADER
        .iter()
        .map(|name| {
            let data_type = match *name {
                schema::DATE => DataType::Date32,
                schema::QUANTITY => DataType::Int64,
                n if schema::is_text_column(n) => DataType::Utf8,
                _ => DataType::Float64,
            };
            Field::new(*name, data_type, true)
        })
        .collect::<Vec<_>>();

    #[allow(clippy::cast_possible_truncation)]
    let quantities: ArrayRef = Arc::new(Int64Array::from(
        records
            .iter()
            .map(|r| r.quantity as i64)
            .collect::<Vec<_>>(),
    ));
    let dates: ArrayRef = Arc::new(Date32Array::from(
        records
            .iter()
            .map(|r| naive_to_date32(r.date))
            .collect::<Vec<_>>(),
    ));

    let columns = vec![
        text(|r| r.invoice_id.clone()),
        text(|r| r.branch.clone()),
        text(|r| r.city.clone()),
        text(|r| r.customer_type.to_string()),
        text(|r| r.gender.clone()),
        text(|r| r.product_line.clone()),
        number(|r| r.unit_price),
        quantities,
        number(|r| r.tax),
        number(|r| r.total),
        dates,
        text(|r| r.time.clone()),
        text(|r| r.payment.to_string()),
        number(|r| r.cogs),
        number(|r| r.gross_margin_percentage),
        number(|r| r.gross_income),
        number(|r| r.rating),
    ];

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Generate a table in memory
pub fn sample_table(rows: usize, seed: u64) -> Result<SalesTable> {
    SalesTable::try_new(records_to_batch(&generate_records(rows, seed))?)
}

/// Write records as a comma separated file, dates formatted with `date_format`
///
/// Fields holding the delimiter or quotes are quoted by the Arrow CSV writer.
pub fn write_csv(path: &Path, records: &[SalesRecord], date_format: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::error::util::ensure_directory(parent)?;
    }
    let batch = records_to_batch(records)?;

    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_date_format(date_format.to_string())
        .build(BufWriter::new(File::create(path)?));
    writer.write(&batch)?;
    writer.into_inner().flush()?;

    log::info!("Wrote {} sample records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_reproducible() {
        assert_eq!(generate_records(50, 7), generate_records(50, 7));
        assert_ne!(generate_records(50, 7), generate_records(50, 8));
    }

    #[test]
    fn generated_totals_include_tax() {
        for record in generate_records(100, 1) {
            let expected = record.expected_total(0.05).unwrap();
            assert!((record.total - expected).abs() < 0.01);
            assert!((4.0..=10.0).contains(&record.rating));
        }
    }

    #[test]
    fn sample_table_has_requested_rows() {
        let table = sample_table(120, 3).unwrap();
        assert_eq!(table.num_rows(), 120);
        assert_eq!(table.column_names().len(), CSV_HEADER.len());
    }

    #[test]
    fn csv_fields_with_commas_survive_a_reload() {
        use crate::config::DashboardConfig;
        use crate::reader::load_sales_table;
        use crate::utils::test::temp_path;

        let mut records = generate_records(30, 11);
        records[0].product_line = "Food, beverages".to_string();
        records[1].city = "Say \"Yangon\"".to_string();
        let path = temp_path("sample_quoted.csv");
        write_csv(&path, &records, "%m/%d/%Y").unwrap();

        let table = load_sales_table(&path, &DashboardConfig::default()).unwrap();
        let loaded = table.records().unwrap();
        assert_eq!(loaded.len(), records.len());
        assert_eq!(loaded[0].product_line, "Food, beverages");
        assert_eq!(loaded[1].city, "Say \"Yangon\"");
        assert!(loaded.iter().zip(&records).all(|(a, b)| a.date == b.date));
    }
}
