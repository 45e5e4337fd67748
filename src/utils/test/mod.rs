//! Test utilities
//!
//! Small fixtures shared by unit tests and the integration tests under `tests/`.


pub use fixtures::{small_records, small_table, temp_path, write_small_csv};
