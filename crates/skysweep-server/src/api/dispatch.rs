//! Sweep planning and drone dispatch endpoints.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use skysweep_core::{build_dispatch_request, plan_grid, Rectangle};
use skysweep_dispatch::{operator_message, DispatchError};
use std::sync::Arc;

use crate::api::request_id::RequestId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DispatchAreaRequest {
    /// The operator's selected rectangle; absent when nothing was drawn.
    #[serde(default)]
    pub area: Option<Rectangle>,
}

/// `POST /v1/area/grid` - coverage grid for display.
pub async fn plan_area_grid(Json(area): Json<Rectangle>) -> Json<Value> {
    let grid = plan_grid(&area);
    Json(json!({
        "line_count": grid.len(),
        "lines": grid.lines,
    }))
}

/// `POST /v1/dispatch/rectangle` - normalize the area and forward it.
pub async fn dispatch_rectangle(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    Json(req): Json<DispatchAreaRequest>,
) -> (StatusCode, Json<Value>) {
    let request = match build_dispatch_request(req.area.as_ref()) {
        Ok(request) => request,
        Err(err) => {
            tracing::info!("Dispatch refused: {}", err);
            let detail = err.to_string();
            let result: Result<(), DispatchError> = Err(err.into());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": operator_message(&result),
                    "detail": detail,
                })),
            );
        }
    };

    let mut dispatcher = state.dispatcher().clone();
    dispatcher.set_request_id(request_id.map(|Extension(id)| id.0));

    let result = dispatcher.dispatch_rectangle(&request).await;
    let message = operator_message(&result);
    match result {
        Ok(ack) => (
            StatusCode::OK,
            Json(json!({
                "message": message,
                "request": request,
                "response": ack.body,
            })),
        ),
        Err(err) => {
            tracing::error!("Drone dispatch failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "message": message,
                    "request": request,
                })),
            )
        }
    }
}
