//! Typed change events emitted by the reconciliation engine.
//!
//! Events are dispatched through a [`crate::notifier::ChangeNotifier`] as they
//! are detected, in emission order. The engine never consumes a response;
//! what happens with a notification is entirely the receiver's decision.

use std::fmt;

use crate::types::{CountyId, Municipality, MunicipalityId, ZipCode};

/// A municipality moved from one county to another.
///
/// Carries the municipality with its new owner already assigned, together
/// with the id of the county it was detached from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityCountyUpdatedEvent {
    /// The reassigned municipality, owner field already updated.
    pub municipality: Municipality,
    /// County the municipality belonged to before this run.
    pub old_county_id: CountyId,
}

/// A zip code moved from one municipality to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCodeMunicipalityUpdatedEvent {
    /// The reassigned zip code, owner field already updated.
    pub zip_code: ZipCode,
    /// Municipality the zip code belonged to before this run.
    pub old_municipality_id: MunicipalityId,
}

/// Municipalities present in the store but absent from the incoming stream.
///
/// These are deletion candidates only. The engine never deletes; a truncated
/// upstream file must not cascade into data loss, so the decision is deferred
/// to the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalitiesToDeleteFoundEvent {
    /// Stale municipalities, ordered by id.
    pub municipalities: Vec<Municipality>,
}

/// Zip codes present in the store but absent from the incoming stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCodesToDeleteFoundEvent {
    /// Stale zip codes, ordered by id.
    pub zip_codes: Vec<ZipCode>,
}

/// Per-run summary counters, fired once after the stream is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCodesUpdatedEvent {
    /// Number of entities created during the run.
    pub added: u64,
    /// Number of existing entities that changed during the run.
    pub changed: u64,
}

/// A change notification emitted during a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A municipality was reassigned to a different county.
    MunicipalityCountyUpdated(MunicipalityCountyUpdatedEvent),
    /// A zip code was reassigned to a different municipality.
    ZipCodeMunicipalityUpdated(ZipCodeMunicipalityUpdatedEvent),
    /// Stale municipalities were found after the stream was exhausted.
    MunicipalitiesToDeleteFound(MunicipalitiesToDeleteFoundEvent),
    /// Stale zip codes were found after the stream was exhausted.
    ZipCodesToDeleteFound(ZipCodesToDeleteFoundEvent),
    /// The run finished consuming the stream; summary counters.
    ZipCodesUpdated(ZipCodesUpdatedEvent),
}

impl Event {
    /// Returns the [`EventType`] that corresponds to this event.
    pub fn event_type(&self) -> EventType {
        self.into()
    }
}

/// Classification of change events without their payloads.
///
/// Useful for filtering and grouping captured notifications in tests and
/// receivers that only route on the category of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Municipality → county reassignment.
    MunicipalityCountyUpdated,
    /// Zip code → municipality reassignment.
    ZipCodeMunicipalityUpdated,
    /// Stale municipality candidates.
    MunicipalitiesToDeleteFound,
    /// Stale zip code candidates.
    ZipCodesToDeleteFound,
    /// Run summary counters.
    ZipCodesUpdated,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MunicipalityCountyUpdated => write!(f, "MunicipalityCountyUpdated"),
            Self::ZipCodeMunicipalityUpdated => write!(f, "ZipCodeMunicipalityUpdated"),
            Self::MunicipalitiesToDeleteFound => write!(f, "MunicipalitiesToDeleteFound"),
            Self::ZipCodesToDeleteFound => write!(f, "ZipCodesToDeleteFound"),
            Self::ZipCodesUpdated => write!(f, "ZipCodesUpdated"),
        }
    }
}

impl From<&Event> for EventType {
    fn from(event: &Event) -> Self {
        match event {
            Event::MunicipalityCountyUpdated(_) => EventType::MunicipalityCountyUpdated,
            Event::ZipCodeMunicipalityUpdated(_) => EventType::ZipCodeMunicipalityUpdated,
            Event::MunicipalitiesToDeleteFound(_) => EventType::MunicipalitiesToDeleteFound,
            Event::ZipCodesToDeleteFound(_) => EventType::ZipCodesToDeleteFound,
            Event::ZipCodesUpdated(_) => EventType::ZipCodesUpdated,
        }
    }
}

impl From<Event> for EventType {
    fn from(event: Event) -> Self {
        (&event).into()
    }
}
