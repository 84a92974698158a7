//! PDF rasterization via MuPDF
//!
//! Renders every page of a PDF to a PNG image so the OCR engine can run
//! over each page independently. MuPDF documents are not thread-safe, so
//! the whole document is opened, rendered, and dropped inside a single
//! `spawn_blocking` call.

use std::io::Cursor;
use std::path::Path;

use image::DynamicImage;
use mupdf::{Colorspace, Document, Matrix};
use thiserror::Error;

/// Render scale. 2x roughly matches a 150 dpi scan, enough detail for
/// Tesseract without ballooning page images.
const RENDER_SCALE: f32 = 2.0;

/// PDF conversion error
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to render page {page}: {reason}")]
    RenderError { page: usize, reason: String },

    #[error("Image encoding failed: {0}")]
    ImageError(String),

    #[error("Task error: {0}")]
    TaskError(String),
}

/// Rasterize every page of the PDF at `path` to PNG bytes, in page order.
pub async fn rasterize_pages(path: &Path) -> Result<Vec<Vec<u8>>, PdfError> {
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let doc = Document::open(path.to_string_lossy().as_ref())
            .map_err(|e| PdfError::OpenError(e.to_string()))?;
        let page_count = doc
            .page_count()
            .map_err(|e| PdfError::OpenError(e.to_string()))? as usize;

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let page = doc
                .load_page(index as i32)
                .map_err(|e| PdfError::RenderError {
                    page: index + 1,
                    reason: e.to_string(),
                })?;

            let matrix = Matrix::new_scale(RENDER_SCALE, RENDER_SCALE);
            let colorspace = Colorspace::device_rgb();
            let pixmap = page
                .to_pixmap(&matrix, &colorspace, true, false)
                .map_err(|e| PdfError::RenderError {
                    page: index + 1,
                    reason: e.to_string(),
                })?;

            pages.push(encode_pixmap_png(&pixmap)?);
        }

        Ok(pages)
    })
    .await
    .map_err(|e| PdfError::TaskError(format!("Task join error: {}", e)))?
}

/// Encode a MuPDF pixmap as PNG bytes
fn encode_pixmap_png(pixmap: &mupdf::Pixmap) -> Result<Vec<u8>, PdfError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgba_buffer = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            let a = if n >= 4 {
                samples.get(offset + 3).copied().unwrap_or(255)
            } else {
                255
            };
            rgba_buffer.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img = image::RgbaImage::from_raw(width, height, rgba_buffer)
        .ok_or_else(|| PdfError::ImageError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| PdfError::ImageError(e.to_string()))?;

    Ok(output)
}
