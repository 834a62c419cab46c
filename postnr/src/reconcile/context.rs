//! Run-scoped state of a reconciliation pass.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{County, CountyId, Municipality, MunicipalityId, ZipCode, ZipCodeId};

/// Mutable per-run state: the county snapshot, counters, change-sets and the
/// accumulators feeding stale detection.
///
/// The context is created at run start and threaded through every step; no
/// run state lives outside it. The county snapshot is loaded once and stays
/// read-only for the remainder of the run.
#[derive(Debug)]
pub(crate) struct RunContext {
    counties: HashMap<CountyId, County>,
    pub(crate) added: u64,
    pub(crate) changed: u64,
    pub(crate) municipality_moves: BTreeMap<MunicipalityId, (CountyId, CountyId)>,
    pub(crate) zip_code_moves: BTreeMap<ZipCodeId, (MunicipalityId, MunicipalityId)>,
    pub(crate) seen_municipalities: BTreeSet<MunicipalityId>,
    pub(crate) seen_zip_codes: BTreeSet<ZipCodeId>,
}

impl RunContext {
    /// Creates a run context around the county snapshot.
    pub(crate) fn new(counties: Vec<County>) -> Self {
        Self {
            counties: counties
                .into_iter()
                .map(|county| (county.id.clone(), county))
                .collect(),
            added: 0,
            changed: 0,
            municipality_moves: BTreeMap::new(),
            zip_code_moves: BTreeMap::new(),
            seen_municipalities: BTreeSet::new(),
            seen_zip_codes: BTreeSet::new(),
        }
    }

    /// Looks up a county in the run-scoped snapshot.
    pub(crate) fn county(&self, id: &CountyId) -> Option<&County> {
        self.counties.get(id)
    }

    /// Finalizes the context into the run summary.
    pub(crate) fn into_summary(
        self,
        municipalities_to_delete: Vec<Municipality>,
        zip_codes_to_delete: Vec<ZipCode>,
    ) -> RunSummary {
        RunSummary {
            added: self.added,
            changed: self.changed,
            municipality_moves: self.municipality_moves,
            zip_code_moves: self.zip_code_moves,
            municipalities_to_delete,
            zip_codes_to_delete,
            finished_at: Utc::now(),
        }
    }
}

/// Outcome of one reconciliation run.
///
/// Counters and change-sets are deterministic for a given input stream and
/// starting store state; [`RunSummary::finished_at`] is the only
/// run-dependent field.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of entities (municipalities and zip codes) created.
    pub added: u64,
    /// Number of existing entities that changed, counted once per entity.
    pub changed: u64,
    /// Municipality id → (old county id, new county id) for every county
    /// reassignment applied during the run.
    pub municipality_moves: BTreeMap<MunicipalityId, (CountyId, CountyId)>,
    /// Zip code id → (old municipality id, new municipality id) for every
    /// municipality reassignment applied during the run.
    pub zip_code_moves: BTreeMap<ZipCodeId, (MunicipalityId, MunicipalityId)>,
    /// Municipalities absent from the incoming stream, ordered by id.
    ///
    /// Deletion candidates only; the store still holds them.
    pub municipalities_to_delete: Vec<Municipality>,
    /// Zip codes absent from the incoming stream, ordered by id.
    pub zip_codes_to_delete: Vec<ZipCode>,
    /// Completion timestamp of the run.
    pub finished_at: DateTime<Utc>,
}
