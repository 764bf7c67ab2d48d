//! Router assembly.

mod customer;
mod health;

pub use customer::{customer_routes, MAX_BODY_BYTES};
pub use health::health_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::handler::HandlerWithoutStateExt;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;

pub const ROUTE_NOT_FOUND: &str = "Resource was not found";

async fn not_found() -> AppError {
    AppError::NotFound(ROUTE_NOT_FOUND.into())
}

/// Full application: customer API, health checks, and static files for anything
/// else. Paths matching neither a route nor a file get a JSON 404.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let files = ServeDir::new(static_dir).not_found_service(not_found.into_service());
    Router::new()
        .merge(health_routes(state.clone()))
        .merge(customer_routes(state))
        .fallback_service(files)
}
