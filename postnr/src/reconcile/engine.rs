//! Reconciliation engine driving a run end to end.

use std::pin::pin;

use futures::StreamExt;
use tracing::info;

use crate::bail;
use crate::error::{ErrorKind, PostnrResult};
use crate::notifier::base::ChangeNotifier;
use crate::reconcile::context::{RunContext, RunSummary};
use crate::reconcile::oslo;
use crate::source::base::RecordSource;
use crate::store::base::RegionStore;
use crate::types::{
    Event, MunicipalitiesToDeleteFoundEvent, Municipality, MunicipalityCountyUpdatedEvent,
    MunicipalityId, ZipCodeMunicipalityUpdatedEvent, ZipCodeRecord, ZipCodesToDeleteFoundEvent,
    ZipCodesUpdatedEvent,
};

/// Identifier of a reconciler, used to correlate log output across runs.
pub type ReconcilerId = u64;

/// Behavior switches for a reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Resolve Oslo zip codes to city-district municipalities through the
    /// built-in district tables instead of the single municipality the
    /// authority file lists for the whole capital.
    pub oslo_districts: bool,
}

/// The reconciliation engine.
///
/// [`Reconciler`] consumes a record stream from a [`RecordSource`], applies
/// creations and updates to a [`RegionStore`], dispatches structural changes
/// through a [`ChangeNotifier`], and computes deletion candidates once the
/// stream is exhausted. It holds no state between runs; everything run-scoped
/// lives in an internal context created per [`Reconciler::run`] call.
///
/// A run is strictly sequential. Each record is fully resolved before the
/// next is requested, so counters and change-sets accumulate in stream order
/// and re-running an unchanged stream against an unchanged store is a no-op
/// apart from the per-run summary event.
#[derive(Debug)]
pub struct Reconciler<S, N> {
    id: ReconcilerId,
    store: S,
    notifier: N,
    options: ReconcileOptions,
}

impl<S, N> Reconciler<S, N>
where
    S: RegionStore + Send + Sync,
    N: ChangeNotifier + Send + Sync,
{
    /// Creates a reconciler with default options.
    pub fn new(id: ReconcilerId, store: S, notifier: N) -> Self {
        Self::with_options(id, store, notifier, ReconcileOptions::default())
    }

    /// Creates a reconciler with the given options.
    pub fn with_options(id: ReconcilerId, store: S, notifier: N, options: ReconcileOptions) -> Self {
        Self {
            id,
            store,
            notifier,
            options,
        }
    }

    /// Returns the id of this reconciler.
    pub fn id(&self) -> ReconcilerId {
        self.id
    }

    /// Runs one full reconciliation pass over the given source.
    ///
    /// On success, returns the run summary. On an [`ErrorKind::UnknownCounty`]
    /// configuration error or a source failure the run aborts immediately:
    /// records processed before the failure remain applied, the failing record
    /// applies nothing, and no stale detection or summary is produced.
    pub async fn run<R>(&self, source: R) -> PostnrResult<RunSummary>
    where
        R: RecordSource,
    {
        info!(reconciler_id = self.id, "starting reconciliation run");

        // Run-scoped read-only county snapshot, loaded once.
        let counties = self.store.all_counties().await?;
        let mut ctx = RunContext::new(counties);

        if self.options.oslo_districts {
            oslo::ensure_districts(&self.store).await?;
        }

        let mut records = pin!(source.produce());
        while let Some(record) = records.next().await {
            let record = record?;
            self.apply_record(&mut ctx, record).await?;
        }

        if self.options.oslo_districts {
            // Districts are maintained by the overlay, not the stream; keep
            // them out of the stale set.
            ctx.seen_municipalities.extend(oslo::district_ids());
        }

        self.notifier
            .notify(Event::ZipCodesUpdated(ZipCodesUpdatedEvent {
                added: ctx.added,
                changed: ctx.changed,
            }))
            .await;

        let municipalities_to_delete = self
            .store
            .municipalities_not_in(&ctx.seen_municipalities)
            .await?;
        if !municipalities_to_delete.is_empty() {
            self.notifier
                .notify(Event::MunicipalitiesToDeleteFound(
                    MunicipalitiesToDeleteFoundEvent {
                        municipalities: municipalities_to_delete.clone(),
                    },
                ))
                .await;
        }

        let zip_codes_to_delete = self.store.zip_codes_not_in(&ctx.seen_zip_codes).await?;
        if !zip_codes_to_delete.is_empty() {
            self.notifier
                .notify(Event::ZipCodesToDeleteFound(ZipCodesToDeleteFoundEvent {
                    zip_codes: zip_codes_to_delete.clone(),
                }))
                .await;
        }

        let summary = ctx.into_summary(municipalities_to_delete, zip_codes_to_delete);

        info!(
            reconciler_id = self.id,
            added = summary.added,
            changed = summary.changed,
            stale_municipalities = summary.municipalities_to_delete.len(),
            stale_zip_codes = summary.zip_codes_to_delete.len(),
            "reconciliation run finished"
        );

        Ok(summary)
    }

    /// Fully resolves one incoming record: municipality first, then the zip
    /// code attached to it, then the stale-detection accumulators.
    async fn apply_record(&self, ctx: &mut RunContext, record: ZipCodeRecord) -> PostnrResult<()> {
        let municipality = self.update_municipality(ctx, &record).await?;
        ctx.seen_municipalities.insert(municipality.id.clone());

        // The district overlay may redirect the zip code to a different owner
        // than the one the record names.
        let owner = if self.options.oslo_districts {
            match oslo::district_for_zip(&record.id) {
                Some(district_id) => self.district_municipality(district_id).await?,
                None => municipality,
            }
        } else {
            municipality
        };

        self.update_zip_code(ctx, &owner, &record).await?;
        ctx.seen_zip_codes.insert(record.id.clone());

        Ok(())
    }

    /// Creates or updates the municipality named by the record.
    ///
    /// Creation attaches the municipality to the county derived from its id.
    /// An update compares name and owning county; a county change is recorded
    /// in the change-set and dispatched with the old owner attached, and
    /// `changed` grows by at most one however many fields differ.
    async fn update_municipality(
        &self,
        ctx: &mut RunContext,
        record: &ZipCodeRecord,
    ) -> PostnrResult<Municipality> {
        let county_id = record.municipality_id.county_id();
        let Some(county) = ctx.county(&county_id).cloned() else {
            bail!(
                ErrorKind::UnknownCounty,
                "incoming data references a county the store does not know about",
                format!(
                    "municipality {} derives county {county_id}",
                    record.municipality_id
                )
            );
        };

        let existing = self.store.find_municipality(&record.municipality_id).await?;

        let Some(mut municipality) = existing else {
            let municipality = self
                .store
                .create_municipality(
                    record.municipality_id.clone(),
                    record.municipality_name.clone(),
                    county.id.clone(),
                )
                .await?;
            ctx.added += 1;

            return Ok(municipality);
        };

        if self.options.oslo_districts && county.id.as_str() == oslo::OSLO_COUNTY_ID {
            // The district overlay owns the capital; the authority file lists
            // all of Oslo under one municipality row, which must not clobber
            // the district entities.
            return Ok(municipality);
        }

        let mut dirty = false;

        if municipality.name != record.municipality_name {
            municipality.name = record.municipality_name.clone();
            dirty = true;
        }

        if municipality.county_id != county.id {
            let old_county_id = municipality.county_id.clone();
            municipality.county_id = county.id.clone();

            ctx.municipality_moves.insert(
                municipality.id.clone(),
                (old_county_id.clone(), county.id.clone()),
            );
            self.notifier
                .notify(Event::MunicipalityCountyUpdated(
                    MunicipalityCountyUpdatedEvent {
                        municipality: municipality.clone(),
                        old_county_id,
                    },
                ))
                .await;

            dirty = true;
        }

        if dirty {
            ctx.changed += 1;
            self.store.save_municipality(&municipality).await?;
        }

        Ok(municipality)
    }

    /// Creates or updates the zip code named by the record, owned by `owner`.
    async fn update_zip_code(
        &self,
        ctx: &mut RunContext,
        owner: &Municipality,
        record: &ZipCodeRecord,
    ) -> PostnrResult<()> {
        let existing = self.store.find_zip_code(&record.id).await?;

        let Some(mut zip_code) = existing else {
            self.store
                .create_zip_code(record.id.clone(), record.name.clone(), owner.id.clone())
                .await?;
            ctx.added += 1;

            return Ok(());
        };

        let mut dirty = false;

        if zip_code.name != record.name {
            zip_code.name = record.name.clone();
            dirty = true;
        }

        if zip_code.municipality_id != owner.id {
            let old_municipality_id = zip_code.municipality_id.clone();
            zip_code.municipality_id = owner.id.clone();

            ctx.zip_code_moves.insert(
                zip_code.id.clone(),
                (old_municipality_id.clone(), owner.id.clone()),
            );
            self.notifier
                .notify(Event::ZipCodeMunicipalityUpdated(
                    ZipCodeMunicipalityUpdatedEvent {
                        zip_code: zip_code.clone(),
                        old_municipality_id,
                    },
                ))
                .await;

            dirty = true;
        }

        if dirty {
            ctx.changed += 1;
            self.store.save_zip_code(&zip_code).await?;
        }

        Ok(())
    }

    /// Resolves a district municipality that the overlay guarantees to exist.
    async fn district_municipality(
        &self,
        district_id: MunicipalityId,
    ) -> PostnrResult<Municipality> {
        let Some(municipality) = self.store.find_municipality(&district_id).await? else {
            bail!(
                ErrorKind::MissingDistrict,
                "district municipality disappeared from the store mid-run",
                district_id
            );
        };

        Ok(municipality)
    }
}
