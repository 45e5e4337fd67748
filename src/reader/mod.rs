//! Module for reading the sales table from CSV or Parquet.
//!
//! Whatever the source format, the result goes through the same
//! post-processing: column names are trimmed, text columns normalized to
//! `Utf8` and the date column parsed to `Date32`.

pub mod cache;

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, AsArray, Date32Array, StringArray};
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, FieldRef, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::DashboardConfig;
use crate::error::util::safe_open_file;
use crate::error::{DashboardError, Result};
use crate::models::SalesTable;
use crate::schema::{self, DateFormatConfig, naive_to_date32, parse_date_string};
use crate::utils::logging::{log_operation_complete, log_operation_start};

pub use cache::DatasetCache;

/// Measure columns always read as `Float64`
const FLOAT_COLUMNS: &[&str] = &[
    schema::UNIT_PRICE,
    schema::TAX,
    schema::TOTAL,
    schema::COGS,
    schema::GROSS_MARGIN_PCT,
    schema::GROSS_INCOME,
    schema::RATING,
];

/// Returns true if the path names a Parquet file
#[must_use]
pub fn is_parquet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"))
}

/// Load the sales table from `path`
///
/// # Errors
/// Returns `FileNotFound` for a missing file, `DateParse` for the first date
/// that no configured format accepts, `MissingColumn` if a column the panels
/// need is absent, and Arrow or Parquet errors for malformed content.
pub fn load_sales_table(path: &Path, config: &DashboardConfig) -> Result<SalesTable> {
    let start = Instant::now();
    log_operation_start("Loading sales data from", path);

    let file = safe_open_file(path, "sales data")?;
    let batch = if is_parquet(path) {
        read_parquet_batch(file, config)?
    } else {
        read_csv_batch(file, config)?
    };

    let batch = trim_column_names(&batch)?;
    let batch = normalize_text_columns(&batch)?;
    let batch = coerce_date_column(&batch, &config.date_format_config)?;
    let table = SalesTable::try_new(batch)?;

    log_operation_complete("loaded", path, table.num_rows(), Some(start.elapsed()));
    Ok(table)
}

/// Read a delimited file into a single record batch
fn read_csv_batch(mut file: File, config: &DashboardConfig) -> Result<RecordBatch> {
    let delimiter = config.delimiter_byte();
    let format = Format::default()
        .with_header(true)
        .with_delimiter(delimiter);
    let (inferred, records) = format.infer_schema(&mut file, Some(config.schema_infer_records))?;
    log::debug!(
        "Inferred {} columns from {records} sampled records",
        inferred.fields().len()
    );
    file.seek(SeekFrom::Start(0))?;

    let schema = Arc::new(csv_read_schema(&inferred));
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_delimiter(delimiter)
        .with_batch_size(config.batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// The schema the CSV reader is built with
///
/// Names are trimmed here so the column overrides below match padded headers.
/// The date column is read as text and parsed afterwards with the configured
/// formats.
fn csv_read_schema(inferred: &Schema) -> Schema {
    let fields = inferred
        .fields()
        .iter()
        .map(|field| {
            let name = field.name().trim();
            let data_type = if name == schema::DATE || schema::is_text_column(name) {
                DataType::Utf8
            } else if FLOAT_COLUMNS.contains(&name) {
                DataType::Float64
            } else if name == schema::QUANTITY && !field.data_type().is_numeric() {
                DataType::Float64
            } else {
                field.data_type().clone()
            };
            Field::new(name, data_type, true)
        })
        .collect::<Vec<_>>();
    Schema::new(fields)
}

/// Read a Parquet file into a single record batch
fn read_parquet_batch(file: File, config: &DashboardConfig) -> Result<RecordBatch> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(config.batch_size);
    let schema: SchemaRef = Arc::clone(builder.schema());
    let reader = builder.build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Strip surrounding whitespace from every column name
pub fn trim_column_names(batch: &RecordBatch) -> Result<RecordBatch> {
    let source = batch.schema();
    if source.fields().iter().all(|f| f.name().trim() == f.name()) {
        return Ok(batch.clone());
    }

    let fields = source
        .fields()
        .iter()
        .map(|f| Arc::new(f.as_ref().clone().with_name(f.name().trim())) as FieldRef)
        .collect::<Vec<_>>();
    let schema = Schema::new_with_metadata(fields, source.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), batch.columns().to_vec())?)
}

/// Cast `LargeUtf8` and `Utf8View` columns to plain `Utf8`
fn normalize_text_columns(batch: &RecordBatch) -> Result<RecordBatch> {
    let source = batch.schema();
    let needs_cast =
        |dt: &DataType| matches!(dt, DataType::LargeUtf8 | DataType::Utf8View);
    if !source.fields().iter().any(|f| needs_cast(f.data_type())) {
        return Ok(batch.clone());
    }

    let mut fields: Vec<FieldRef> = Vec::with_capacity(source.fields().len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(source.fields().len());
    for (field, column) in source.fields().iter().zip(batch.columns()) {
        if needs_cast(field.data_type()) {
            columns.push(arrow::compute::cast(column, &DataType::Utf8)?);
            fields.push(Arc::new(field.as_ref().clone().with_data_type(DataType::Utf8)));
        } else {
            columns.push(Arc::clone(column));
            fields.push(Arc::clone(field));
        }
    }
    let schema = Schema::new_with_metadata(fields, source.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// Replace the date column with a fully parsed `Date32` column
///
/// A null or unparseable value anywhere aborts the conversion.
pub fn coerce_date_column(batch: &RecordBatch, config: &DateFormatConfig) -> Result<RecordBatch> {
    let source = batch.schema();
    let idx = source
        .index_of(schema::DATE)
        .map_err(|_| DashboardError::MissingColumn(schema::DATE.to_string()))?;
    let column = batch.column(idx);

    let dates: ArrayRef = match column.data_type() {
        DataType::Date32 => Arc::clone(column),
        DataType::Date64 | DataType::Timestamp(_, _) => {
            arrow::compute::cast(column, &DataType::Date32)?
        }
        DataType::Utf8 => Arc::new(parse_date_strings(column.as_string::<i32>(), config)?),
        _ => {
            return Err(DashboardError::ColumnType {
                column: schema::DATE.to_string(),
                expected: "date or text",
            });
        }
    };

    if let Some(row) = (0..dates.len()).find(|&row| dates.is_null(row)) {
        return Err(DashboardError::DateParse {
            row,
            value: String::from("<null>"),
        });
    }

    let fields = source
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if i == idx {
                Arc::new(Field::new(schema::DATE, DataType::Date32, false))
            } else {
                Arc::clone(f)
            }
        })
        .collect::<Vec<FieldRef>>();
    let mut columns = batch.columns().to_vec();
    columns[idx] = dates;

    let schema = Schema::new_with_metadata(fields, source.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

fn parse_date_strings(values: &StringArray, config: &DateFormatConfig) -> Result<Date32Array> {
    let mut days = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        let raw = value.unwrap_or_default();
        let date = parse_date_string(raw, config).ok_or_else(|| {
            log::error!("Date '{raw}' in row {row} matches none of {:?}", config.date_formats);
            DashboardError::DateParse {
                row,
                value: raw.to_string(),
            }
        })?;
        days.push(naive_to_date32(date));
    }
    Ok(Date32Array::from(days))
}
