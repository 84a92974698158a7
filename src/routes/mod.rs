//! Route modules for Scantext Server

pub mod auth;
pub mod contact;
pub mod ocr;
pub mod pages;
pub mod pdf;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.config().server.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .merge(pages::router())
        .merge(auth::router())
        .merge(contact::router())
        .merge(ocr::router())
        .merge(pdf::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Build a plain-text attachment response
pub(crate) fn text_attachment(filename: &str, body: String) -> Response {
    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(axum::body::Body::from(body))
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "failed to build attachment response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
