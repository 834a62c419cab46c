//! Tracing subscriber setup for binaries and tests.

use std::sync::Once;

use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter applied when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVES: &str = "info";

/// Guards [`init_test_tracing`] against repeated initialization across tests
/// in one process.
static TEST_TRACING: Once = Once::new();

/// Errors raised while installing the global tracing subscriber.
#[derive(Debug, Error)]
pub enum InitTracingError {
    /// A global subscriber was already installed.
    #[error("failed to install the global tracing subscriber: {0}")]
    SetGlobalDefault(#[from] SetGlobalDefaultError),
}

/// Initializes tracing for a service binary.
///
/// Composes an [`EnvFilter`] (respecting `RUST_LOG`, defaulting to `info`)
/// with a formatting layer that carries the service name as a top-level
/// field. Call once from `main` before any span or event is emitted.
pub fn init_tracing(service_name: &str) -> Result<(), InitTracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(service = service_name, "tracing initialized");

    Ok(())
}

/// Initializes tracing for tests.
///
/// Idempotent: the first caller in the process installs a compact subscriber,
/// later callers are no-ops, so every test can call this unconditionally as
/// its first line.
pub fn init_test_tracing() {
    TEST_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
