//! Authoritative county seed data.

use postnr::error::PostnrResult;
use postnr::store::RegionStore;
use postnr::types::{County, CountyId};
use tracing::info;

/// The authoritative county list: (id, name).
const COUNTY_SEED: &[(&str, &str)] = &[
    ("03", "Oslo"),
    ("11", "Rogaland"),
    ("15", "Møre og Romsdal"),
    ("18", "Nordland"),
    ("21", "Svalbard"),
    ("22", "Jan Mayen"),
    ("23", "Kontinentalsokkelen"),
    ("30", "Viken"),
    ("34", "Innlandet"),
    ("38", "Vestfold og Telemark"),
    ("42", "Agder"),
    ("46", "Vestland"),
    ("50", "Trøndelag"),
    ("54", "Troms og Finnmark"),
];

/// Creates every missing county from the authoritative list.
///
/// Idempotent: counties already in the store are left untouched.
pub async fn seed_counties<S>(store: &S) -> PostnrResult<()>
where
    S: RegionStore + Send + Sync,
{
    let mut created = 0u32;

    for (id, name) in COUNTY_SEED {
        let county_id = CountyId::new(*id);
        if store.find_county(&county_id).await?.is_none() {
            store.create_county(County::new(*id, *name)).await?;
            created += 1;
        }
    }

    if created > 0 {
        info!(created, "seeded missing counties");
    }

    Ok(())
}
