//! In-memory sales table and its typed row view.

pub mod record;
pub mod table;

pub use record::{CustomerType, PaymentMethod, SalesRecord};
pub use table::SalesTable;
