//! Incoming record shape produced by record sources.

use serde::{Deserialize, Serialize};

use crate::types::{MunicipalityId, ZipCodeId};

/// One row of the authority's postal table: a zip code together with the
/// municipality it currently belongs to.
///
/// Records are produced by a [`crate::source::RecordSource`] one per zip code.
/// The municipality id is already normalized to its canonical 4-digit form by
/// [`ZipCodeRecord::new`], so derivation and store lookups downstream operate
/// on a single spelling per municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipCodeRecord {
    /// Zip code identifier.
    pub id: ZipCodeId,
    /// Zip code display name (postal place).
    pub name: String,
    /// Canonical identifier of the owning municipality.
    pub municipality_id: MunicipalityId,
    /// Municipality display name.
    pub municipality_name: String,
}

impl ZipCodeRecord {
    /// Creates a record from raw authority fields.
    pub fn new(
        id: impl Into<ZipCodeId>,
        name: impl Into<String>,
        municipality_id: impl Into<MunicipalityId>,
        municipality_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            municipality_id: municipality_id.into(),
            municipality_name: municipality_name.into(),
        }
    }
}
