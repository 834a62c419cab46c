//! Entities of the three-level administrative region hierarchy.
//!
//! Counties own municipalities, municipalities own zip codes. All identifiers
//! are authority-assigned digit strings; the municipality → county relation is
//! denormalized into the municipality id itself (first two digits of the
//! padded id), which is why [`MunicipalityId::county_id`] exists as a pure
//! derivation instead of a store lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of digits in a canonical municipality identifier.
const MUNICIPALITY_ID_DIGITS: usize = 4;

/// Number of digits in a canonical county identifier.
const COUNTY_ID_DIGITS: usize = 2;

/// Identifier of a county, a 2-digit authority-assigned string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountyId(String);

impl CountyId {
    /// Creates a county id from an authority-assigned value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a municipality, canonically a 4-digit string.
///
/// The authority's postal table is not consistently zero-padded, so
/// [`MunicipalityId::new`] left-pads shorter identifiers with `'0'`. The
/// canonical form keeps the "first two digits equal the owning county id"
/// invariant intact for every incoming spelling of the same municipality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MunicipalityId(String);

impl MunicipalityId {
    /// Creates a municipality id, normalizing to the 4-digit canonical form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(left_pad(id.into(), MUNICIPALITY_ID_DIGITS))
    }

    /// Derives the owning county id from this municipality id.
    ///
    /// Pure and total: the first two characters of the canonical 4-digit form.
    /// The derived id may name a county that does not exist; handling that is
    /// the caller's responsibility, not the derivation's.
    pub fn county_id(&self) -> CountyId {
        CountyId::new(&self.0[..COUNTY_ID_DIGITS])
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MunicipalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MunicipalityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a zip code, a 4-digit authority-assigned string.
///
/// Unlike municipality ids, zip ids carry no structural relation to their
/// owner and are stored exactly as published.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZipCodeId(String);

impl ZipCodeId {
    /// Creates a zip code id from an authority-assigned value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZipCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZipCodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Left-pads `value` with `'0'` up to `width` characters.
fn left_pad(value: String, width: usize) -> String {
    if value.len() >= width {
        return value;
    }

    let mut padded = String::with_capacity(width);
    for _ in value.len()..width {
        padded.push('0');
    }
    padded.push_str(&value);

    padded
}

/// Top-level administrative region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct County {
    /// Authority-assigned 2-digit identifier.
    pub id: CountyId,
    /// Display name.
    pub name: String,
}

impl County {
    /// Creates a county.
    pub fn new(id: impl Into<CountyId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Mid-level administrative region, owned by exactly one county.
///
/// The owner may change over time; the engine reports such reassignments as
/// change events rather than applying them silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// Canonical 4-digit identifier.
    pub id: MunicipalityId,
    /// Display name.
    pub name: String,
    /// Identifier of the owning county.
    pub county_id: CountyId,
}

impl Municipality {
    /// Creates a municipality owned by the given county.
    pub fn new(
        id: impl Into<MunicipalityId>,
        name: impl Into<String>,
        county_id: impl Into<CountyId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            county_id: county_id.into(),
        }
    }
}

/// Leaf postal unit, owned by exactly one municipality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipCode {
    /// Authority-assigned 4-digit identifier.
    pub id: ZipCodeId,
    /// Display name.
    pub name: String,
    /// Identifier of the owning municipality.
    pub municipality_id: MunicipalityId,
}

impl ZipCode {
    /// Creates a zip code owned by the given municipality.
    pub fn new(
        id: impl Into<ZipCodeId>,
        name: impl Into<String>,
        municipality_id: impl Into<MunicipalityId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            municipality_id: municipality_id.into(),
        }
    }
}
