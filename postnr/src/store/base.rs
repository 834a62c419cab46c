//! Trait for storing and retrieving the administrative region hierarchy.

use std::collections::BTreeSet;
use std::future::Future;

use crate::error::PostnrResult;
use crate::types::{County, CountyId, Municipality, MunicipalityId, ZipCode, ZipCodeId};

/// Trait for the mutable source of truth of counties, municipalities and zip
/// codes.
///
/// [`RegionStore`] implementations define how the hierarchy is persisted. The
/// reconciliation engine consumes point lookups, creates, in-place saves and
/// the two "not in set" queries used for stale detection; the remaining
/// county operations exist for seed and migration glue outside the engine.
///
/// A reconciliation run assumes exclusive access to the store for its
/// duration: the engine loads the county set once at start and never
/// refreshes it mid-run.
///
/// "Create" methods construct, persist and return the entity; "save" methods
/// persist an in-place mutation of an entity that already exists.
pub trait RegionStore {
    /// Returns the county with the given id, if present.
    fn find_county(
        &self,
        id: &CountyId,
    ) -> impl Future<Output = PostnrResult<Option<County>>> + Send;

    /// Returns all counties, ordered by id.
    ///
    /// Loaded once per run as the engine's read-only county snapshot.
    fn all_counties(&self) -> impl Future<Output = PostnrResult<Vec<County>>> + Send;

    /// Persists a new county.
    fn create_county(&self, county: County) -> impl Future<Output = PostnrResult<County>> + Send;

    /// Removes a county.
    ///
    /// Never called by the engine; exists for explicit region migrations.
    fn delete_county(&self, id: &CountyId) -> impl Future<Output = PostnrResult<()>> + Send;

    /// Returns the municipality with the given id, if present.
    fn find_municipality(
        &self,
        id: &MunicipalityId,
    ) -> impl Future<Output = PostnrResult<Option<Municipality>>> + Send;

    /// Constructs a municipality owned by `county_id`, persists and returns it.
    fn create_municipality(
        &self,
        id: MunicipalityId,
        name: String,
        county_id: CountyId,
    ) -> impl Future<Output = PostnrResult<Municipality>> + Send;

    /// Persists an in-place mutation of an existing municipality.
    fn save_municipality(
        &self,
        municipality: &Municipality,
    ) -> impl Future<Output = PostnrResult<()>> + Send;

    /// Returns the municipalities owned by the given county, ordered by id.
    fn municipalities_owned_by(
        &self,
        county_id: &CountyId,
    ) -> impl Future<Output = PostnrResult<Vec<Municipality>>> + Send;

    /// Returns the municipalities whose id is NOT in `ids`, ordered by id.
    fn municipalities_not_in(
        &self,
        ids: &BTreeSet<MunicipalityId>,
    ) -> impl Future<Output = PostnrResult<Vec<Municipality>>> + Send;

    /// Returns the zip code with the given id, if present.
    fn find_zip_code(
        &self,
        id: &ZipCodeId,
    ) -> impl Future<Output = PostnrResult<Option<ZipCode>>> + Send;

    /// Constructs a zip code owned by `municipality_id`, persists and returns
    /// it.
    fn create_zip_code(
        &self,
        id: ZipCodeId,
        name: String,
        municipality_id: MunicipalityId,
    ) -> impl Future<Output = PostnrResult<ZipCode>> + Send;

    /// Persists an in-place mutation of an existing zip code.
    fn save_zip_code(&self, zip_code: &ZipCode) -> impl Future<Output = PostnrResult<()>> + Send;

    /// Returns the zip codes whose id is NOT in `ids`, ordered by id.
    fn zip_codes_not_in(
        &self,
        ids: &BTreeSet<ZipCodeId>,
    ) -> impl Future<Output = PostnrResult<Vec<ZipCode>>> + Send;
}
