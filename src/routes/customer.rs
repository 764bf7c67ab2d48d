//! Customer CRUD routes.

use crate::error::AppError;
use crate::handlers::customer::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/customers",
            get(list).post(create).fallback(method_not_allowed),
        )
        .route(
            "/customers/:id",
            get(read)
                .patch(update)
                .delete(delete_handler)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
