//! OCR engines
//!
//! Defines the engine trait and the Tesseract implementation, which shells
//! out to the `tesseract` binary through temp files.

use async_trait::async_trait;

use super::types::OcrError;

/// OCR engine trait
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Check if the engine is usable on this host
    async fn is_available(&self) -> bool;

    /// Extract text from an encoded image (PNG/JPEG bytes).
    /// An empty string is a valid result for a blank image.
    async fn recognize(&self, image_data: &[u8]) -> Result<String, OcrError>;
}

/// Tesseract OCR engine
pub struct TesseractEngine {
    command: String,
    language: String,
}

impl TesseractEngine {
    pub fn new(command: &str, language: &str) -> Self {
        Self {
            command: command.to_string(),
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn is_available(&self) -> bool {
        std::process::Command::new(&self.command)
            .arg("--version")
            .output()
            .is_ok()
    }

    async fn recognize(&self, image_data: &[u8]) -> Result<String, OcrError> {
        use std::process::Command;

        let temp_dir = std::env::temp_dir();
        let input_path = temp_dir.join(format!("ocr_input_{}.png", uuid::Uuid::new_v4()));
        let output_base = temp_dir.join(format!("ocr_output_{}", uuid::Uuid::new_v4()));

        std::fs::write(&input_path, image_data)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let output = Command::new(&self.command)
            .arg(&input_path)
            .arg(&output_base)
            .arg("-l")
            .arg(&self.language)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .output();

        let _ = std::fs::remove_file(&input_path);

        let output = output
            .map_err(|e| OcrError::EngineNotAvailable(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr
            )));
        }

        let output_file = format!("{}.txt", output_base.display());
        let text = std::fs::read_to_string(&output_file)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to read output: {}", e)))?;

        let _ = std::fs::remove_file(&output_file);

        Ok(text.trim_end().to_string())
    }
}
