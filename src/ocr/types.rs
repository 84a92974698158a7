//! OCR error types

/// Recognition failure. Handlers render these inline as a user-visible
/// message rather than failing the request.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),
}
