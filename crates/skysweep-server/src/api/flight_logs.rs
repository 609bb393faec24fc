//! Flight history endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use skysweep_core::{FlightLog, StoredFlightLog};
use std::sync::Arc;

use crate::persistence::StoreError;
use crate::state::AppState;

/// Map a store failure onto an HTTP status. An unreachable store is `503`,
/// distinct from both an empty history and a malformed request.
pub(crate) fn store_error_response(err: &StoreError) -> (StatusCode, Json<Value>) {
    match err {
        StoreError::Validation(detail) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Invalid flight log",
                "detail": detail.to_string(),
            })),
        ),
        StoreError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Flight log store unavailable",
                "hint": "Retry once the database is reachable",
            })),
        ),
        StoreError::Corrupt { .. } | StoreError::Encode(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Server error" })),
        ),
    }
}

/// `GET /api/flight-history/history`, `GET /v1/flight-logs`
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredFlightLog>>, (StatusCode, Json<Value>)> {
    state
        .history()
        .list_history()
        .await
        .map(Json)
        .map_err(|err| store_error_response(&err))
}

/// `POST /v1/flight-logs`
pub async fn create_flight_log(
    State(state): State<Arc<AppState>>,
    Json(log): Json<FlightLog>,
) -> (StatusCode, Json<Value>) {
    match state.store().save(&log).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))),
        Err(err) => {
            if let StoreError::Validation(detail) = &err {
                tracing::warn!(drone_id = %log.drone_id, "Rejected flight log: {}", detail);
            } else {
                tracing::error!(drone_id = %log.drone_id, "Failed to save flight log: {}", err);
            }
            store_error_response(&err)
        }
    }
}
