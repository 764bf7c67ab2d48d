//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid environment variable {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// Driver text is surfaced as-is in the response body.
    #[error("{0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Storage(ref e) = self {
            tracing::error!(error = %e, "storage error");
        }
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("migration ledger: {0}")]
    Ledger(#[source] sqlx::Error),
    #[error("migration {name} failed: {source}")]
    Failed {
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidInput("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            AppError::Storage(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn message_is_verbatim() {
        assert_eq!(
            AppError::NotFound("Customer was not found".into()).to_string(),
            "Customer was not found"
        );
        let storage = AppError::Storage(sqlx::Error::Protocol("connection reset".into()));
        assert_eq!(storage.to_string(), sqlx::Error::Protocol("connection reset".into()).to_string());
    }

    #[test]
    fn migration_error_names_the_migration() {
        let e = MigrationError::Failed {
            name: "create_customers_table",
            source: sqlx::Error::Protocol("boom".into()),
        };
        assert!(e.to_string().starts_with("migration create_customers_table failed"));
    }
}
