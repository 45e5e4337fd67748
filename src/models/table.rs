//! The loaded sales table.
//!
//! `SalesTable` wraps a single Arrow record batch and offers typed access to
//! the columns the dashboard aggregates. It is immutable once built; filtering
//! produces a new table.

use arrow::array::{Array, ArrayRef, AsArray, Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Date32Type, Float64Type, SchemaRef};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{DashboardError, Result};
use crate::models::record::{CustomerType, PaymentMethod, SalesRecord};
use crate::schema::{self, date32_to_naive};

/// Immutable in-memory sales table
#[derive(Debug, Clone)]
pub struct SalesTable {
    batch: RecordBatch,
}

impl SalesTable {
    /// Wrap a record batch, checking the columns every panel relies on
    ///
    /// # Errors
    /// Returns `MissingColumn` if a required column is absent and `ColumnType`
    /// if the date column is not `Date32`
    pub fn try_new(batch: RecordBatch) -> Result<Self> {
        let batch_schema = batch.schema();
        for name in schema::REQUIRED_COLUMNS {
            if batch_schema.index_of(name).is_err() {
                return Err(DashboardError::MissingColumn((*name).to_string()));
            }
        }

        let date_type = batch_schema.field_with_name(schema::DATE)?.data_type();
        if date_type != &DataType::Date32 {
            return Err(DashboardError::ColumnType {
                column: schema::DATE.to_string(),
                expected: "Date32",
            });
        }

        Ok(Self { batch })
    }

    /// The underlying record batch
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Column names in schema order
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Raw column by name
    pub fn column(&self, name: &str) -> Result<&ArrayRef> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
    }

    /// Text column by name
    pub fn utf8_column(&self, name: &str) -> Result<&StringArray> {
        self.column(name)?
            .as_string_opt::<i32>()
            .ok_or_else(|| DashboardError::ColumnType {
                column: name.to_string(),
                expected: "Utf8",
            })
    }

    /// Numeric column by name, cast to `Float64`
    pub fn f64_column(&self, name: &str) -> Result<Float64Array> {
        let column = self.column(name)?;
        if !column.data_type().is_numeric() {
            return Err(DashboardError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
            });
        }
        let cast = arrow::compute::cast(column, &DataType::Float64)?;
        cast.as_primitive_opt::<Float64Type>()
            .cloned()
            .ok_or_else(|| DashboardError::ColumnType {
                column: name.to_string(),
                expected: "Float64",
            })
    }

    /// Non-null values of a numeric column
    pub fn f64_values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.f64_column(name)?.iter().flatten().collect())
    }

    /// The parsed date column
    pub fn date_column(&self) -> Result<&Date32Array> {
        self.column(schema::DATE)?
            .as_primitive_opt::<Date32Type>()
            .ok_or_else(|| DashboardError::ColumnType {
                column: schema::DATE.to_string(),
                expected: "Date32",
            })
    }

    /// Distinct product lines in order of first appearance
    pub fn product_lines(&self) -> Result<Vec<String>> {
        self.distinct_values(schema::PRODUCT_LINE)
    }

    /// Distinct non-null values of a text column in order of first appearance
    pub fn distinct_values(&self, name: &str) -> Result<Vec<String>> {
        let column = self.utf8_column(name)?;
        Ok(column
            .iter()
            .flatten()
            .unique()
            .map(str::to_string)
            .collect())
    }

    /// Names of the numeric columns, in schema order
    #[must_use]
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .filter(|f| f.data_type().is_numeric())
            .map(|f| f.name().clone())
            .collect()
    }

    /// Typed row view of the whole table
    ///
    /// Optional columns that are absent read as empty strings or `NaN`.
    pub fn records(&self) -> Result<Vec<SalesRecord>> {
        let invoice = self.utf8_column(schema::INVOICE_ID).ok();
        let branch = self.utf8_column(schema::BRANCH)?;
        let city = self.utf8_column(schema::CITY).ok();
        let customer = self.utf8_column(schema::CUSTOMER_TYPE)?;
        let gender = self.utf8_column(schema::GENDER).ok();
        let product = self.utf8_column(schema::PRODUCT_LINE)?;
        let unit_price = self.f64_column(schema::UNIT_PRICE).ok();
        let quantity = self.f64_column(schema::QUANTITY).ok();
        let tax = self.f64_column(schema::TAX).ok();
        let total = self.f64_column(schema::TOTAL)?;
        let dates = self.date_column()?;
        let time = self.utf8_column(schema::TIME).ok();
        let payment = self.utf8_column(schema::PAYMENT)?;
        let cogs = self.f64_column(schema::COGS)?;
        let margin = self.f64_column(schema::GROSS_MARGIN_PCT).ok();
        let gross_income = self.f64_column(schema::GROSS_INCOME)?;
        let rating = self.f64_column(schema::RATING)?;

        let mut records = Vec::with_capacity(self.num_rows());
        for row in 0..self.num_rows() {
            let date = if dates.is_null(row) {
                None
            } else {
                date32_to_naive(dates.value(row))
            };
            let date = date.ok_or_else(|| DashboardError::DateParse {
                row,
                value: String::from("<null>"),
            })?;

            records.push(SalesRecord {
                invoice_id: str_at(invoice, row),
                branch: str_at(Some(branch), row),
                city: str_at(city, row),
                customer_type: CustomerType::from(str_at(Some(customer), row).as_str()),
                gender: str_at(gender, row),
                product_line: str_at(Some(product), row),
                unit_price: f64_at(unit_price.as_ref(), row),
                quantity: f64_at(quantity.as_ref(), row),
                tax: f64_at(tax.as_ref(), row),
                total: f64_at(Some(&total), row),
                date,
                time: str_at(time, row),
                payment: PaymentMethod::from(str_at(Some(payment), row).as_str()),
                cogs: f64_at(Some(&cogs), row),
                gross_margin_percentage: f64_at(margin.as_ref(), row),
                gross_income: f64_at(Some(&gross_income), row),
                rating: f64_at(Some(&rating), row),
            });
        }
        Ok(records)
    }
}

fn str_at(array: Option<&StringArray>, row: usize) -> String {
    match array {
        Some(a) if a.is_valid(row) => a.value(row).to_string(),
        _ => String::new(),
    }
}

fn f64_at(array: Option<&Float64Array>, row: usize) -> f64 {
    match array {
        Some(a) if a.is_valid(row) => a.value(row),
        _ => f64::NAN,
    }
}
