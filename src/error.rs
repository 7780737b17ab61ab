//! Unified error types for the todo backend.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Message returned when a create request has no usable title.
pub const MISSING_TITLE_MESSAGE: &str = "title requerido";

/// Message returned for any storage failure. The cause stays in the logs.
pub const STORAGE_ERROR_MESSAGE: &str = "DB error";

/// Errors raised while talking to the todo store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Driver or query failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store refused the operation (used by the in-memory store).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Create request without a non-empty `title`.
    #[error("title is required")]
    MissingTitle,

    /// Storage round-trip failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTitle => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for this error.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingTitle => MISSING_TITLE_MESSAGE,
            ApiError::Storage(_) => STORAGE_ERROR_MESSAGE,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Fixed error message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(err) = &self {
            error!(error = %err, "storage operation failed");
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Fatal errors during process startup.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Could not open the connection pool.
    #[error("failed to connect to {url}: {source}")]
    Connect {
        /// Database URL with the password masked.
        url: String,
        /// Driver error.
        source: sqlx::Error,
    },

    /// Schema creation failed.
    #[error("failed to initialize schema: {0}")]
    Schema(#[source] sqlx::Error),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error, e.g. the listener could not bind.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
