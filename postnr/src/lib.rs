//! Reconciliation engine for the Norwegian administrative region hierarchy.
//!
//! The `postnr` crate keeps a locally persisted hierarchy of counties,
//! municipalities and zip codes in sync with the periodically published
//! authoritative postal table. The [`reconcile::Reconciler`] consumes a stream
//! of incoming records from a [`source::RecordSource`], applies creations and
//! updates to a [`store::RegionStore`], emits structural changes as typed
//! events through a [`notifier::ChangeNotifier`], and reports entities that
//! disappeared from the upstream dataset as deletion candidates without ever
//! deleting them itself.

pub mod error;
pub mod macros;
pub mod notifier;
pub mod reconcile;
pub mod source;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
