//! Feedback database operations

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;

/// New feedback insert request
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Feedback repository
pub struct FeedbackRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FeedbackRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a feedback message
    pub async fn create(&self, new: &NewFeedback) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO feedback (id, name, email, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.message)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
