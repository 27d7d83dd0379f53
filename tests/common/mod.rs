//! Shared test utilities for snmp-usm integration tests.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;

pub use fixtures::*;

/// Install a test subscriber so `tracing` output shows up with `--nocapture`.
///
/// Set `RUST_LOG=snmp_usm=trace` to see encode offsets.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
