//! Application configuration loaded from environment variables

use serde::Deserialize;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ocr: OcrConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

/// OCR engine settings
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code passed with `-l`
    pub language: String,
    /// Name or path of the tesseract executable
    pub command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 8080,
                max_upload_bytes: 32 * 1024 * 1024,
            },
            database: DatabaseConfig {
                url: "sqlite://scantext.db".to_string(),
            },
            ocr: OcrConfig {
                language: "eng".to_string(),
                command: "tesseract".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        let port = match std::env::var("SCANTEXT_PORT") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.server.port,
        };

        let max_upload_bytes = match std::env::var("SCANTEXT_MAX_UPLOAD_BYTES") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.server.max_upload_bytes,
        };

        let url = std::env::var("DATABASE_URL").unwrap_or(defaults.database.url);

        let language =
            std::env::var("SCANTEXT_OCR_LANGUAGE").unwrap_or(defaults.ocr.language);
        let command = std::env::var("SCANTEXT_OCR_COMMAND").unwrap_or(defaults.ocr.command);

        Ok(Self {
            server: ServerConfig {
                port,
                max_upload_bytes,
            },
            database: DatabaseConfig { url },
            ocr: OcrConfig { language, command },
        })
    }
}
