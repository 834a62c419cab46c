//! Shared configuration types for postnr services.

mod updater;

pub use updater::{ReconcileSettings, SourceConfig, UpdaterConfig};
