//! Utilities shared across the crate
//!
//! Logging and console helpers, the synthetic data generator and the test
//! fixtures.

pub mod logging;
pub mod sample;
pub mod test;
