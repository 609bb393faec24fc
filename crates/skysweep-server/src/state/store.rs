//! Shared application state handed to every request handler.

use skysweep_core::{sample_flight_log, StoredId};
use skysweep_dispatch::DispatchClient;

use crate::config::Config;
use crate::history::FlightLogQueryService;
use crate::persistence::{Database, StoreResult, TelemetryStore};

/// Application state - storage, history queries and the dispatch client.
pub struct AppState {
    store: TelemetryStore,
    history: FlightLogQueryService,
    dispatcher: DispatchClient,
    config: Config,
}

impl AppState {
    pub fn new(db: Database, dispatcher: DispatchClient, config: Config) -> Self {
        let store = TelemetryStore::new(db);
        Self {
            history: FlightLogQueryService::new(store.clone()),
            store,
            dispatcher,
            config,
        }
    }

    pub fn store(&self) -> &TelemetryStore {
        &self.store
    }

    pub fn history(&self) -> &FlightLogQueryService {
        &self.history
    }

    pub fn dispatcher(&self) -> &DispatchClient {
        &self.dispatcher
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store the reference mission if no flights have been recorded yet.
    pub async fn seed_sample_if_empty(&self) -> StoreResult<Option<StoredId>> {
        if self.store.count().await? > 0 {
            return Ok(None);
        }
        let id = self.store.save(&sample_flight_log()).await?;
        tracing::info!(flight_log_id = %id, "Seeded sample flight log");
        Ok(Some(id))
    }
}
