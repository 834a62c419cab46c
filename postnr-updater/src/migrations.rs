//! Explicit region migrations applied before a run.
//!
//! County-level restructuring is never the engine's business: the engine
//! reports deletion candidates among municipalities and zip codes but does
//! not create or remove counties. Structural changes to the county level are
//! applied here, explicitly, before a reconciliation runs.

use postnr::error::PostnrResult;
use postnr::store::RegionStore;
use postnr::types::{County, CountyId};
use tracing::info;

/// The merged county: Trøndelag.
const TRONDELAG: (&str, &str) = ("50", "Trøndelag");

/// Counties dissolved into Trøndelag by the 2018 merger.
const MERGED_COUNTY_IDS: &[&str] = &["16", "17"];

/// Applies all pending region migrations.
pub async fn apply_region_migrations<S>(store: &S) -> PostnrResult<()>
where
    S: RegionStore + Send + Sync,
{
    merge_trondelag(store).await?;

    Ok(())
}

/// The 2018 county merger: Sør-Trøndelag (16) and Nord-Trøndelag (17) became
/// Trøndelag (50).
///
/// Creates the new county, moves every municipality owned by the dissolved
/// counties over, and removes the dissolved counties. The presence of county
/// 50 marks the migration as applied, making it a no-op on later runs.
async fn merge_trondelag<S>(store: &S) -> PostnrResult<()>
where
    S: RegionStore + Send + Sync,
{
    let (trondelag_id, trondelag_name) = TRONDELAG;
    let trondelag = CountyId::new(trondelag_id);

    if store.find_county(&trondelag).await?.is_some() {
        return Ok(());
    }

    info!("applying the Trøndelag county merger");

    store
        .create_county(County::new(trondelag_id, trondelag_name))
        .await?;

    for merged_id in MERGED_COUNTY_IDS {
        let merged = CountyId::new(*merged_id);

        for mut municipality in store.municipalities_owned_by(&merged).await? {
            municipality.county_id = trondelag.clone();
            store.save_municipality(&municipality).await?;
        }

        store.delete_county(&merged).await?;
    }

    Ok(())
}
