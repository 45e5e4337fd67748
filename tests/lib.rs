/// Main test module that includes all sub-modules
/// Run specific tests with `cargo test <module>::<submodule>`
/// For example: `cargo test integration::dashboard_test`
// Utility modules
pub mod utils;

// Integration tests
pub mod integration {
    pub mod dashboard_test;
    pub mod filtering_test;
    pub mod loading_test;
}

// Aggregation tests against the typed row view
pub mod algorithm {
    pub mod aggregation_test;
}
