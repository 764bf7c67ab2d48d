//! Liveness and readiness checks for process supervisors.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

/// The process is up and serving; no storage access.
async fn live() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The customers database answers one round trip. A failure is a 500 carrying
/// the driver's message, the same shape as every other error.
async fn ready(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.customers.ping().await?;
    Ok(Json(json!({ "status": "ready" })))
}

pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(live))
        .route("/ready", get(ready))
        .with_state(state)
}
