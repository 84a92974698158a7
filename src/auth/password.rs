//! Password digests
//!
//! Credentials store an Argon2id PHC string: salt and cost parameters
//! travel inside the digest, so verification needs nothing beyond the
//! stored value. A fresh salt per hash means identical passwords never
//! share a digest.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use thiserror::Error;

/// Failure while producing a password digest. Verification never errors;
/// a bad stored digest simply does not match.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

// Cost tuned for an interactive login form: ~24 MiB and three passes keep
// a login under a tenth of a second on server hardware.
fn login_hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(24 * 1024, 3, 1, None)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Digest a password for storage
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = login_hasher()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(digest.to_string())
}

/// Check a password against a stored digest. Mismatch, a malformed
/// digest, and unusable parameters all answer `false`.
pub fn verify_password(plaintext: &str, stored_digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_digest) else {
        return false;
    };
    let Ok(hasher) = login_hasher() else {
        return false;
    };
    hasher.verify_password(plaintext.as_bytes(), &parsed).is_ok()
}
