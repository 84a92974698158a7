//! Application state management

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::ocr::OcrEngine;

/// Shared application state
///
/// Everything the handlers touch lives here: no module-level database
/// handle, no process-wide secret outside the session store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    db: SqlitePool,
    sessions: SessionStore,
    ocr: Arc<dyn OcrEngine>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, db: SqlitePool, ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                db,
                sessions: SessionStore::new(),
                ocr,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Get the OCR engine
    pub fn ocr(&self) -> &Arc<dyn OcrEngine> {
        &self.inner.ocr
    }
}
