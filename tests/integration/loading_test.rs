use std::fs::File;
use std::io::Write;

use arrow::datatypes::DataType;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use sales_dashboard::schema::{self, DateFormatConfig};
use sales_dashboard::utils::sample::{PRODUCT_LINES, records_to_batch, write_csv};
use sales_dashboard::utils::test::{small_records, temp_path};
use sales_dashboard::{DashboardConfig, DashboardError, load_sales_table};

use crate::utils::{SAMPLE_ROWS, sample_csv, sample_records};

#[test]
fn csv_loads_every_row_with_parsed_dates() -> sales_dashboard::Result<()> {
    let path = sample_csv("load_rows")?;
    let table = load_sales_table(&path, &DashboardConfig::default())?;

    assert_eq!(table.num_rows(), SAMPLE_ROWS);
    assert_eq!(
        table.schema().field_with_name(schema::DATE)?.data_type(),
        &DataType::Date32
    );
    for line in table.product_lines()? {
        assert!(PRODUCT_LINES.contains(&line.as_str()), "unexpected line {line}");
    }

    let records = table.records()?;
    let expected = sample_records();
    assert_eq!(records[0].date, expected[0].date);
    assert_eq!(records[SAMPLE_ROWS - 1].invoice_id, expected[SAMPLE_ROWS - 1].invoice_id);
    Ok(())
}

#[test]
fn iso_dates_load_with_default_formats() -> sales_dashboard::Result<()> {
    let path = temp_path("load_iso.csv");
    write_csv(&path, &sample_records()[..50], "%Y-%m-%d")?;
    let table = load_sales_table(&path, &DashboardConfig::default())?;
    assert_eq!(table.num_rows(), 50);
    Ok(())
}

#[test]
fn day_first_dates_need_configuration() -> sales_dashboard::Result<()> {
    let path = temp_path("load_day_first.csv");
    let mut records = small_records();
    records[1].date = NaiveDate::from_ymd_opt(2019, 3, 30).expect("valid date");
    write_csv(&path, &records, "%d/%m/%Y")?;

    // 30/03/2019 has no month 30, so month-first parsing rejects it
    let err = load_sales_table(&path, &DashboardConfig::default()).unwrap_err();
    assert!(
        matches!(err, DashboardError::DateParse { row: 1, ref value } if value == "30/03/2019"),
        "unexpected error {err}"
    );

    let config = DashboardConfig::default()
        .with_date_format_config(DateFormatConfig::default().with_formats(["%d/%m/%Y"]));
    let loaded = load_sales_table(&path, &config)?.records()?;
    assert_eq!(loaded.len(), records.len());
    assert!(loaded.iter().zip(&records).all(|(a, b)| a.date == b.date));
    Ok(())
}

#[test]
fn parquet_source_matches_csv_source() -> sales_dashboard::Result<()> {
    let records = sample_records();
    let batch = records_to_batch(&records)?;
    let path = temp_path("load.parquet");
    let mut writer = ArrowWriter::try_new(File::create(&path)?, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    let from_parquet = load_sales_table(&path, &DashboardConfig::default())?;
    let from_csv = load_sales_table(&sample_csv("load_compare")?, &DashboardConfig::default())?;

    assert_eq!(from_parquet.num_rows(), from_csv.num_rows());
    assert_eq!(from_parquet.product_lines()?, from_csv.product_lines()?);
    let totals_parquet = from_parquet.f64_values(schema::TOTAL)?;
    let totals_csv = from_csv.f64_values(schema::TOTAL)?;
    assert!(
        totals_parquet
            .iter()
            .zip(&totals_csv)
            .all(|(a, b)| (a - b).abs() < 1e-3)
    );
    Ok(())
}

#[test]
fn missing_rating_column_is_reported() -> sales_dashboard::Result<()> {
    let path = temp_path("load_no_rating.csv");
    let mut file = File::create(&path)?;
    writeln!(
        file,
        "Invoice ID,Branch,City,Customer type,Gender,Product line,Unit price,Quantity,Tax 5%,Total,Date,Time,Payment,cogs,gross margin percentage,gross income"
    )?;
    writeln!(
        file,
        "750-67-8428,A,Yangon,Member,Female,Health and beauty,74.69,7,26.1415,548.9715,01/05/2019,13:08,Ewallet,522.83,4.761904762,26.1415"
    )?;
    drop(file);

    let err = load_sales_table(&path, &DashboardConfig::default()).unwrap_err();
    assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == schema::RATING));
    Ok(())
}

#[test]
fn missing_file_is_fatal() {
    let err = load_sales_table(&temp_path("nowhere.csv"), &DashboardConfig::default()).unwrap_err();
    assert!(matches!(err, DashboardError::FileNotFound(_)));
}
