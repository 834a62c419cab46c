//! Telemetry initialization for postnr services.

pub mod tracing;
