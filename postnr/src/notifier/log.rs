//! Change notifier that emits events through `tracing`.

use tracing::{info, warn};

use crate::notifier::base::ChangeNotifier;
use crate::types::Event;

/// Change notifier that logs every event.
///
/// The deletion-candidate events are logged at `warn` level since they are
/// the ones an operator is expected to act on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogChangeNotifier;

impl LogChangeNotifier {
    /// Creates a new log notifier.
    pub fn new() -> Self {
        Self
    }
}

impl ChangeNotifier for LogChangeNotifier {
    async fn notify(&self, event: Event) {
        match &event {
            Event::MunicipalityCountyUpdated(event) => {
                info!(
                    municipality_id = %event.municipality.id,
                    old_county_id = %event.old_county_id,
                    new_county_id = %event.municipality.county_id,
                    "municipality moved between counties"
                );
            }
            Event::ZipCodeMunicipalityUpdated(event) => {
                info!(
                    zip_code_id = %event.zip_code.id,
                    old_municipality_id = %event.old_municipality_id,
                    new_municipality_id = %event.zip_code.municipality_id,
                    "zip code moved between municipalities"
                );
            }
            Event::MunicipalitiesToDeleteFound(event) => {
                warn!(
                    count = event.municipalities.len(),
                    "municipalities absent from the incoming stream; deletion candidates"
                );
            }
            Event::ZipCodesToDeleteFound(event) => {
                warn!(
                    count = event.zip_codes.len(),
                    "zip codes absent from the incoming stream; deletion candidates"
                );
            }
            Event::ZipCodesUpdated(event) => {
                info!(
                    added = event.added,
                    changed = event.changed,
                    "zip code update run finished"
                );
            }
        }
    }
}
