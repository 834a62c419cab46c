//! Store builders for tests.

use crate::store::MemoryRegionStore;
use crate::store::base::RegionStore;
use crate::types::{County, Municipality, MunicipalityId, ZipCode, ZipCodeId};

/// Creates a memory store holding the given counties.
pub async fn store_with_counties(counties: &[(&str, &str)]) -> MemoryRegionStore {
    MemoryRegionStore::with_counties(
        counties
            .iter()
            .map(|(id, name)| County::new(*id, *name))
            .collect::<Vec<_>>(),
    )
    .await
}

/// Adds a municipality to the store, returning it.
pub async fn insert_municipality(
    store: &MemoryRegionStore,
    id: &str,
    name: &str,
    county_id: &str,
) -> Municipality {
    store
        .create_municipality(MunicipalityId::new(id), name.to_string(), county_id.into())
        .await
        .expect("memory store writes are infallible")
}

/// Adds a zip code to the store, returning it.
pub async fn insert_zip_code(
    store: &MemoryRegionStore,
    id: &str,
    name: &str,
    municipality_id: &str,
) -> ZipCode {
    store
        .create_zip_code(
            ZipCodeId::new(id),
            name.to_string(),
            MunicipalityId::new(municipality_id),
        )
        .await
        .expect("memory store writes are infallible")
}
