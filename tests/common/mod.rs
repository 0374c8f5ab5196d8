//! Shared fixtures for integration tests

#![allow(dead_code)]

use ghg_esg_core::types::{Row, TabularData};

/// Install a test subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_test_writer()
        .try_init();
}

/// Rows as JSON objects, headers in the given order
pub fn table(headers: &[&str], rows_json: &str) -> TabularData {
    let rows: Vec<Row> = serde_json::from_str(rows_json).expect("fixture rows must be valid JSON");
    TabularData::new(headers.iter().map(|h| h.to_string()).collect(), rows)
}
