//! Zip code updater service binary.
//!
//! Runs one reconciliation of the local region hierarchy against a downloaded
//! copy of the authority's postal table: loads configuration, initializes
//! tracing, seeds and migrates the store, runs the engine and logs the run
//! report.

use postnr_config::load::load_config;
use postnr_config::shared::UpdaterConfig;
use postnr_telemetry::tracing::init_tracing;

mod core;
mod migrations;
mod seed;

/// Entry point for the updater service.
///
/// Loads configuration before the async runtime starts, then hands over to
/// [`core::start_updater`].
fn main() -> anyhow::Result<()> {
    let updater_config: UpdaterConfig = load_config()?;

    init_tracing(env!("CARGO_BIN_NAME"))?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(core::start_updater(updater_config))?;

    Ok(())
}
