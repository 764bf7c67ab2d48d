//! Customer CRUD handlers: list, read, create, update (PATCH merge), delete.

use crate::customers::{CustomerPatch, NewCustomer};
use crate::error::AppError;
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const INVALID_ID: &str = "Please ensure the id is numeric";
pub const INVALID_BODY: &str = "Invalid data passed";

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::InvalidInput(INVALID_ID.into()))
}

/// Decode a JSON object body into `T`, whatever the request's content type.
/// Unreadable, unparsable or non-object bodies are `InvalidInput`.
fn decode_body<T: DeserializeOwned>(payload: Result<Bytes, BytesRejection>) -> Result<T, AppError> {
    let invalid = || AppError::InvalidInput(INVALID_BODY.into());
    let bytes = payload.map_err(|e| {
        tracing::debug!(error = %e, "body could not be read");
        invalid()
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "body is not JSON");
        invalid()
    })?;
    if !value.is_object() {
        return Err(invalid());
    }
    serde_json::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "body does not match customer shape");
        invalid()
    })
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let customers = state.customers.all().await?;
    Ok(ok(customers))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let customer = state.customers.of_id(id).await?;
    Ok(ok(customer))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let new: NewCustomer = decode_body(payload)?;
    let customer = state.customers.create(new).await?;
    tracing::info!(id = customer.id, "customer created");
    Ok(created(customer))
}

/// Fetch, merge the provided fields over the stored record, persist.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let mut customer = state.customers.of_id(id).await?;
    let patch: CustomerPatch = decode_body(payload)?;
    if !patch.is_empty() {
        patch.apply(&mut customer);
        state.customers.update(&customer).await?;
    }
    Ok(ok(customer))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let customer = state.customers.of_id(id).await?;
    state.customers.delete(&customer).await?;
    tracing::info!(id, "customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
