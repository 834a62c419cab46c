use postnr::notifier::LogChangeNotifier;
use postnr::reconcile::{ReconcileOptions, Reconciler, render_report};
use postnr::source::FileRecordSource;
use postnr::store::MemoryRegionStore;
use postnr_config::shared::UpdaterConfig;
use tracing::info;

use crate::migrations::apply_region_migrations;
use crate::seed::seed_counties;

/// Prepares the store and runs one reconciliation per service invocation.
pub async fn start_updater(config: UpdaterConfig) -> anyhow::Result<()> {
    // The store trait is the seam a persistent backend plugs into; this
    // service wires the in-memory implementation.
    let store = MemoryRegionStore::new();
    seed_counties(&store).await?;
    apply_region_migrations(&store).await?;

    let source = FileRecordSource::new(config.source.path.clone());
    let options = ReconcileOptions {
        oslo_districts: config.reconcile.oslo_districts,
    };
    let reconciler =
        Reconciler::with_options(config.id, store, LogChangeNotifier::new(), options);

    let summary = reconciler.run(source).await?;

    let report = render_report(&summary)?;
    info!("{report}");

    Ok(())
}
