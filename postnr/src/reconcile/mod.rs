//! The reconciliation engine.
//!
//! One reconciliation run is a single pass over an incoming record stream
//! followed by stale detection: every record is fully applied (municipality,
//! then zip code) before the next one is requested, and entities never seen
//! during the pass are reported as deletion candidates afterwards.

mod context;
mod engine;
mod oslo;
mod report;

pub use context::RunSummary;
pub use engine::{ReconcileOptions, Reconciler, ReconcilerId};
pub use report::render_report;
