//! Configuration of the updater service.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration of the updater binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Identifier of the updater instance, correlates log output.
    pub id: u64,
    /// Where the incoming records come from.
    pub source: SourceConfig,
    /// Engine behavior switches.
    #[serde(default)]
    pub reconcile: ReconcileSettings,
}

/// Location of the downloaded authority postal table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the tab-separated postal table file.
    pub path: PathBuf,
}

/// Engine behavior switches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileSettings {
    /// Resolve Oslo zip codes to city-district municipalities.
    #[serde(default)]
    pub oslo_districts: bool,
}
