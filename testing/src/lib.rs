//! # Roster Testing
//!
//! Testing utilities and helpers for the Roster client architecture.
//!
//! This crate provides:
//! - [`ReducerHarness`]: drive a reducer deterministically, settling its
//!   effects inline instead of on spawned tasks
//! - [`StateProbe`]: collect state snapshots from a store subscription
//! - [`RecordingLogger`]: capture diagnostic lines for assertions
//! - [`init_test_tracing`]: route `tracing` output into test captures

pub mod harness;
pub mod logger;
pub mod probe;

pub use harness::ReducerHarness;
pub use logger::{LogLine, RecordingLogger};
pub use probe::StateProbe;

/// Initialize a tracing subscriber for tests
///
/// Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}
