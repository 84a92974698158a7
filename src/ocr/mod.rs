//! OCR Module
//!
//! Text recognition for uploaded images and rasterized PDF pages.
//! Recognition is delegated to an engine behind a trait so tests can
//! substitute a deterministic implementation.

mod engine;
mod types;

pub use engine::{OcrEngine, TesseractEngine};
pub use types::OcrError;
