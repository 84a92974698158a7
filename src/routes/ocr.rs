//! Image OCR routes

use std::io::Cursor;

use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::auth::AuthSession;
use crate::error::{AppError, Result};
use crate::ocr::OcrError;
use crate::state::AppState;
use crate::views;

use super::text_attachment;

/// Create the image OCR router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ocr", get(ocr_form).post(ocr_upload))
        .route("/download_ocr", post(download_ocr))
}

async fn ocr_form(_session: AuthSession) -> Html<String> {
    views::ocr_page(None, None)
}

async fn ocr_upload(
    _session: AuthSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(format!("Multipart read failed: {}", e)))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Internal(format!("Multipart read failed: {}", e)))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let Some((filename, data)) = upload else {
        return Ok(views::ocr_page(None, Some("No file part")).into_response());
    };
    if filename.is_empty() {
        return Ok(views::ocr_page(None, Some("No file selected")).into_response());
    }

    match extract_image_text(&state, data).await {
        Ok(text) => {
            tracing::info!(filename = %filename, chars = text.len(), "image recognized");
            Ok(views::ocr_page(Some(&text), None).into_response())
        }
        Err(e) => {
            tracing::warn!(filename = %filename, error = %e, "image recognition failed");
            Ok(
                views::ocr_page(None, Some(&format!("Error processing image: {}", e)))
                    .into_response(),
            )
        }
    }
}

/// Decode the upload, normalize it to PNG, and run the OCR engine.
async fn extract_image_text(state: &AppState, data: Vec<u8>) -> std::result::Result<String, OcrError> {
    let png = tokio::task::spawn_blocking(move || -> std::result::Result<Vec<u8>, OcrError> {
        let img = image::load_from_memory(&data)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to decode image: {}", e)))?;

        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to encode image: {}", e)))?;
        Ok(out)
    })
    .await
    .map_err(|e| OcrError::ProcessingError(format!("Task join error: {}", e)))??;

    state.ocr().recognize(&png).await
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadForm {
    #[serde(default)]
    pub extracted_text: Option<String>,
}

/// Return the previously extracted text as a plain-text attachment.
/// The text comes straight from the form, not from storage.
async fn download_ocr(_session: AuthSession, Form(form): Form<DownloadForm>) -> Response {
    match form.extracted_text.filter(|text| !text.is_empty()) {
        Some(text) => text_attachment("extracted_text.txt", text),
        None => Redirect::to("/ocr").into_response(),
    }
}
