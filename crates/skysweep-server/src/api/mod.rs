//! API routes for the SkySweep server.

pub mod dispatch;
pub mod flight_logs;
pub mod request_id;
mod routes;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
