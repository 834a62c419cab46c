//! In-memory region store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::PostnrResult;
use crate::store::base::RegionStore;
use crate::types::{County, CountyId, Municipality, MunicipalityId, ZipCode, ZipCodeId};

/// Inner state of [`MemoryRegionStore`].
///
/// All collections are keyed `BTreeMap`s so every listing method returns
/// entities in id order, which keeps run output deterministic.
#[derive(Debug, Default)]
struct Inner {
    counties: BTreeMap<CountyId, County>,
    municipalities: BTreeMap<MunicipalityId, Municipality>,
    zip_codes: BTreeMap<ZipCodeId, ZipCode>,
}

/// In-memory implementation of [`RegionStore`].
///
/// Keeps the whole hierarchy in process memory. This is the store used by
/// tests and by the updater binary; a persistent backend would implement the
/// same trait against its own storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegionStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRegionStore {
    /// Creates a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given counties.
    pub async fn with_counties(counties: impl IntoIterator<Item = County>) -> Self {
        let store = Self::new();

        {
            let mut inner = store.inner.lock().await;
            for county in counties {
                inner.counties.insert(county.id.clone(), county);
            }
        }

        store
    }
}

impl RegionStore for MemoryRegionStore {
    async fn find_county(&self, id: &CountyId) -> PostnrResult<Option<County>> {
        let inner = self.inner.lock().await;

        Ok(inner.counties.get(id).cloned())
    }

    async fn all_counties(&self) -> PostnrResult<Vec<County>> {
        let inner = self.inner.lock().await;

        Ok(inner.counties.values().cloned().collect())
    }

    async fn create_county(&self, county: County) -> PostnrResult<County> {
        let mut inner = self.inner.lock().await;

        debug!(county_id = %county.id, "creating county");

        inner.counties.insert(county.id.clone(), county.clone());

        Ok(county)
    }

    async fn delete_county(&self, id: &CountyId) -> PostnrResult<()> {
        let mut inner = self.inner.lock().await;

        debug!(county_id = %id, "deleting county");

        inner.counties.remove(id);

        Ok(())
    }

    async fn find_municipality(&self, id: &MunicipalityId) -> PostnrResult<Option<Municipality>> {
        let inner = self.inner.lock().await;

        Ok(inner.municipalities.get(id).cloned())
    }

    async fn create_municipality(
        &self,
        id: MunicipalityId,
        name: String,
        county_id: CountyId,
    ) -> PostnrResult<Municipality> {
        let mut inner = self.inner.lock().await;

        debug!(municipality_id = %id, county_id = %county_id, "creating municipality");

        let municipality = Municipality::new(id, name, county_id);
        inner
            .municipalities
            .insert(municipality.id.clone(), municipality.clone());

        Ok(municipality)
    }

    async fn save_municipality(&self, municipality: &Municipality) -> PostnrResult<()> {
        let mut inner = self.inner.lock().await;

        debug!(municipality_id = %municipality.id, "saving municipality");

        inner
            .municipalities
            .insert(municipality.id.clone(), municipality.clone());

        Ok(())
    }

    async fn municipalities_owned_by(
        &self,
        county_id: &CountyId,
    ) -> PostnrResult<Vec<Municipality>> {
        let inner = self.inner.lock().await;

        Ok(inner
            .municipalities
            .values()
            .filter(|municipality| municipality.county_id == *county_id)
            .cloned()
            .collect())
    }

    async fn municipalities_not_in(
        &self,
        ids: &BTreeSet<MunicipalityId>,
    ) -> PostnrResult<Vec<Municipality>> {
        let inner = self.inner.lock().await;

        Ok(inner
            .municipalities
            .values()
            .filter(|municipality| !ids.contains(&municipality.id))
            .cloned()
            .collect())
    }

    async fn find_zip_code(&self, id: &ZipCodeId) -> PostnrResult<Option<ZipCode>> {
        let inner = self.inner.lock().await;

        Ok(inner.zip_codes.get(id).cloned())
    }

    async fn create_zip_code(
        &self,
        id: ZipCodeId,
        name: String,
        municipality_id: MunicipalityId,
    ) -> PostnrResult<ZipCode> {
        let mut inner = self.inner.lock().await;

        debug!(zip_code_id = %id, municipality_id = %municipality_id, "creating zip code");

        let zip_code = ZipCode::new(id, name, municipality_id);
        inner
            .zip_codes
            .insert(zip_code.id.clone(), zip_code.clone());

        Ok(zip_code)
    }

    async fn save_zip_code(&self, zip_code: &ZipCode) -> PostnrResult<()> {
        let mut inner = self.inner.lock().await;

        debug!(zip_code_id = %zip_code.id, "saving zip code");

        inner
            .zip_codes
            .insert(zip_code.id.clone(), zip_code.clone());

        Ok(())
    }

    async fn zip_codes_not_in(&self, ids: &BTreeSet<ZipCodeId>) -> PostnrResult<Vec<ZipCode>> {
        let inner = self.inner.lock().await;

        Ok(inner
            .zip_codes
            .values()
            .filter(|zip_code| !ids.contains(&zip_code.id))
            .cloned()
            .collect())
    }
}
