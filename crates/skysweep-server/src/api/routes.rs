//! REST API routes.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{dispatch, flight_logs, request_id};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    let history_routes = Router::new()
        // Path served to the existing history page
        .route("/api/flight-history/history", get(flight_logs::list_history))
        .route(
            "/v1/flight-logs",
            get(flight_logs::list_history).post(flight_logs::create_flight_log),
        );

    let sweep_routes = Router::new()
        .route("/v1/area/grid", post(dispatch::plan_area_grid))
        .route("/v1/dispatch/rectangle", post(dispatch::dispatch_rectangle));

    history_routes
        .merge(sweep_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
