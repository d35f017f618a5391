//! Common utilities for testing quay actors: named sender identities,
//! typed handles over deployed actors, and transaction matchers.

pub mod contracts;
pub mod matchers;
pub mod users;

pub use quay_types::to_nano;

/// Install a `tracing` subscriber that writes to the test output, filtered
/// by `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
