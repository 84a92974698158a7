//! Application error type
//!
//! Handler-recoverable conditions (bad upload, failed recognition, invalid
//! credentials) never reach this type; they are rendered inline on the page
//! that produced them. `AppError` covers infrastructure failures only.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// Infrastructure error surfaced as a 500
#[derive(Debug, Error)]
pub enum AppError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Background task failure
    #[error("Task error: {0}")]
    Task(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for handlers and repositories
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>".to_string()),
        )
            .into_response()
    }
}
