//! Read-only flight history queries.

use skysweep_core::StoredFlightLog;

use crate::persistence::{StoreResult, TelemetryStore};

/// Query layer over [`TelemetryStore`] used by the history endpoint.
#[derive(Clone)]
pub struct FlightLogQueryService {
    store: TelemetryStore,
}

impl FlightLogQueryService {
    pub fn new(store: TelemetryStore) -> Self {
        Self { store }
    }

    /// Every stored flight log, oldest first.
    ///
    /// A failing store is reported as an error, never as an empty history.
    pub async fn list_history(&self) -> StoreResult<Vec<StoredFlightLog>> {
        match self.store.find_all().await {
            Ok(logs) => {
                tracing::debug!(count = logs.len(), "Loaded flight history");
                Ok(logs)
            }
            Err(err) => {
                tracing::error!("Failed to load flight history: {}", err);
                Err(err)
            }
        }
    }
}
