//! PDF OCR routes
//!
//! Uploads land in a scoped temp file which MuPDF rasterizes page by
//! page; each page image goes through the OCR engine independently and
//! the per-page text is joined with newlines, first page first. The temp
//! file is removed when it goes out of scope, including on conversion
//! failure.

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::auth::AuthSession;
use crate::error::{AppError, Result};
use crate::pdf::rasterize_pages;
use crate::state::AppState;
use crate::views;

use super::ocr::DownloadForm;
use super::text_attachment;

/// Create the PDF OCR router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pdf", get(pdf_form).post(pdf_upload))
        .route("/download_pdf", post(download_pdf))
}

async fn pdf_form(_session: AuthSession) -> Html<String> {
    views::pdf_page(None, None)
}

async fn pdf_upload(
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
        if field.name() == Some("pdf") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Internal(format!("Multipart read failed: {}", e)))?;
            upload = Some((filename, data.to_vec()));
        }
    }

    let Some((filename, data)) = upload else {
        return Ok(views::pdf_page(None, Some("No file part")).into_response());
    };
    if filename.is_empty() {
        return Ok(views::pdf_page(None, Some("No file selected")).into_response());
    }
    if !filename.to_lowercase().ends_with(".pdf") {
        return Ok(views::pdf_page(None, Some("Uploaded file is not a PDF")).into_response());
    }

    match extract_pdf_text(&state, data).await {
        Ok(text) => {
            tracing::info!(filename = %filename, chars = text.len(), "pdf recognized");
            Ok(views::pdf_page(Some(&text), None).into_response())
        }
        Err(reason) => {
            tracing::warn!(filename = %filename, error = %reason, "pdf recognition failed");
            Ok(
                views::pdf_page(None, Some(&format!("Error processing PDF: {}", reason)))
                    .into_response(),
            )
        }
    }
}

/// Persist the upload to a temp file, rasterize, and OCR every page.
async fn extract_pdf_text(state: &AppState, data: Vec<u8>) -> std::result::Result<String, String> {
    let temp_file = tokio::task::spawn_blocking(move || -> std::io::Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        file.write_all(&data)?;
        file.flush()?;
        Ok(file)
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
    .map_err(|e| format!("Failed to store upload: {}", e))?;

    let pages = rasterize_pages(temp_file.path())
        .await
        .map_err(|e| e.to_string())?;

    let mut page_texts = Vec::with_capacity(pages.len());
    for page in &pages {
        let text = state.ocr().recognize(page).await.map_err(|e| e.to_string())?;
        page_texts.push(text);
    }

    Ok(page_texts.join("\n"))
}

/// Same contract as `/download_ocr`, sourced from the PDF page
async fn download_pdf(_session: AuthSession, Form(form): Form<DownloadForm>) -> Response {
    match form.extracted_text.filter(|text| !text.is_empty()) {
        Some(text) => text_attachment("extracted_text.txt", text),
        None => Redirect::to("/pdf").into_response(),
    }
}
