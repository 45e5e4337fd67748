//! Typed view of one sales transaction.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Loyalty status of the customer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CustomerType {
    Member,
    Normal,
    Other(String),
}

impl From<&str> for CustomerType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "member" => Self::Member,
            "normal" => Self::Normal,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => f.write_str("Member"),
            Self::Normal => f.write_str("Normal"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// How the transaction was paid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    Ewallet,
    Other(String),
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "cash" => Self::Cash,
            "creditcard" | "card" => Self::CreditCard,
            "ewallet" => Self::Ewallet,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => f.write_str("Cash"),
            Self::CreditCard => f.write_str("Credit card"),
            Self::Ewallet => f.write_str("Ewallet"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// One row of the sales table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub invoice_id: String,
    pub branch: String,
    pub city: String,
    pub customer_type: CustomerType,
    pub gender: String,
    pub product_line: String,
    pub unit_price: f64,
    pub quantity: f64,
    pub tax: f64,
    pub total: f64,
    pub date: NaiveDate,
    pub time: String,
    pub payment: PaymentMethod,
    pub cogs: f64,
    pub gross_margin_percentage: f64,
    pub gross_income: f64,
    pub rating: f64,
}

impl SalesRecord {
    /// `Unit price × Quantity × (1 + tax_rate)`, or `None` when an input is missing
    #[must_use]
    pub fn expected_total(&self, tax_rate: f64) -> Option<f64> {
        if self.unit_price.is_nan() || self.quantity.is_nan() {
            return None;
        }
        Some(self.unit_price * self.quantity * (1.0 + tax_rate))
    }
}
