//! Column catalog of the sales table and date handling helpers.

pub mod date_utils;

pub use date_utils::{DateFormatConfig, date32_to_naive, naive_to_date32, parse_date_string};

/// Transaction identifier
pub const INVOICE_ID: &str = "Invoice ID";
/// Branch code (A, B, C)
pub const BRANCH: &str = "Branch";
/// City of the branch
pub const CITY: &str = "City";
/// Member or Normal
pub const CUSTOMER_TYPE: &str = "Customer type";
/// Customer gender
pub const GENDER: &str = "Gender";
/// Product line catalog value
pub const PRODUCT_LINE: &str = "Product line";
/// Price of one unit
pub const UNIT_PRICE: &str = "Unit price";
/// Number of units sold
pub const QUANTITY: &str = "Quantity";
/// Tax amount on the line
pub const TAX: &str = "Tax 5%";
/// Amount charged including tax
pub const TOTAL: &str = "Total";
/// Calendar date of the sale
pub const DATE: &str = "Date";
/// Time of day of the sale
pub const TIME: &str = "Time";
/// Payment method
pub const PAYMENT: &str = "Payment";
/// Cost of goods sold
pub const COGS: &str = "cogs";
/// Gross margin as a percentage, constant in the source data
pub const GROSS_MARGIN_PCT: &str = "gross margin percentage";
/// Revenue minus cogs
pub const GROSS_INCOME: &str = "gross income";
/// Customer satisfaction score
pub const RATING: &str = "Rating";

/// Columns always read as text, whatever the CSV inference would pick
pub const TEXT_COLUMNS: &[&str] = &[
    INVOICE_ID,
    BRANCH,
    CITY,
    CUSTOMER_TYPE,
    GENDER,
    PRODUCT_LINE,
    TIME,
    PAYMENT,
];

/// Columns the eight dashboard panels read
pub const REQUIRED_COLUMNS: &[&str] = &[
    BRANCH,
    CUSTOMER_TYPE,
    PRODUCT_LINE,
    TOTAL,
    DATE,
    PAYMENT,
    COGS,
    GROSS_INCOME,
    RATING,
];

/// Columns that never take part in the correlation matrix even if numeric
pub const NON_MEASURE_COLUMNS: &[&str] = &[
    INVOICE_ID,
    BRANCH,
    CITY,
    CUSTOMER_TYPE,
    GENDER,
    PRODUCT_LINE,
    DATE,
    TIME,
    PAYMENT,
    GROSS_MARGIN_PCT,
];

/// Returns true if `name` is one of the forced text columns
#[must_use]
pub fn is_text_column(name: &str) -> bool {
    TEXT_COLUMNS.contains(&name)
}
