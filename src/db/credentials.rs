//! Login credential database operations

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;

/// Stored credential record. `password` holds the argon2 PHC string,
/// never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Credential {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub email: String,
}

/// New credential insert request
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub name: String,
    pub username: String,
    /// Already-hashed password
    pub password: String,
    pub email: String,
}

/// Outcome of a registration attempt
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    DuplicateUsername,
}

/// Credential repository
pub struct CredentialRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CredentialRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a credential by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, name, username, password, email
            FROM logincredentials
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(credential)
    }

    /// Insert a new credential. The UNIQUE constraint on username is the
    /// authority on duplicates; a violation maps to `DuplicateUsername`
    /// instead of an error so the handler can re-render the signup form.
    pub async fn create(&self, new: &NewCredential) -> Result<RegisterOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO logincredentials (id, name, username, password, email, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&new.name)
        .bind(&new.username)
        .bind(&new.password)
        .bind(&new.email)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => Ok(RegisterOutcome::Created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(RegisterOutcome::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }
}
