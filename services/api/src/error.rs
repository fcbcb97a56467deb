//! services/api/src/error.rs
//!
//! Defines the primary error type for the API service and the mapping from
//! core errors to HTTP responses.

use crate::config::ConfigError;
use axum::http::StatusCode;
use field_booking_core::{CoreError, PortError};
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a failure while applying database migrations.
    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Converts a core failure into the `(status, message)` pair handlers return.
///
/// Input problems are echoed back to the caller; server-side failures are
/// logged and replaced with a generic message.
pub fn http_error(context: &str, err: CoreError) -> (StatusCode, String) {
    match err {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        CoreError::DataFetch(PortError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
        CoreError::DataFetch(PortError::Conflict(msg)) => (StatusCode::CONFLICT, msg),
        CoreError::DataFetch(e) => {
            error!("{}: {:?}", context, e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{}: booking data is unavailable", context),
            )
        }
        e @ (CoreError::Encoding(_) | CoreError::QrRender(_)) => {
            error!("{}: {:?}", context, e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{}: {}", context, e))
        }
    }
}
