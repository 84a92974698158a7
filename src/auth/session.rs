//! Cookie-backed session layer
//!
//! Sessions live in an in-process map keyed by a random id. The browser
//! holds only the id plus an HMAC-SHA256 tag over it, so a forged or
//! tampered cookie never reaches the map lookup. The signing key is
//! generated at process start; restarting the server invalidates every
//! outstanding session. Abandoned sessions expire lazily: a lookup past
//! the TTL evicts the entry instead of resolving it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::response::Redirect;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use uuid::Uuid;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "scantext_session";

/// Typed view of an authenticated session
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub username: String,
    pub email: String,
}

/// How long an untouched session stays valid
const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct SessionRecord {
    session: AuthSession,
    created_at: Instant,
}

/// In-process session store with a per-process signing key
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    key: [u8; 32],
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionRecord>>,
}

impl SessionStore {
    /// Create a store with a fresh random signing key
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    fn with_ttl(ttl: Duration) -> Self {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        Self {
            inner: Arc::new(SessionStoreInner {
                key,
                ttl,
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Establish a session and return the signed cookie value
    pub fn create(&self, username: &str, email: &str) -> String {
        let id = Uuid::new_v4();
        self.inner.sessions.write().insert(
            id,
            SessionRecord {
                session: AuthSession {
                    username: username.to_string(),
                    email: email.to_string(),
                },
                created_at: Instant::now(),
            },
        );
        format!("{}.{}", id, self.sign(&id))
    }

    /// Resolve a cookie value to its session, if the signature checks out
    /// and the session exists and has not expired. Expired entries are
    /// evicted on the spot.
    pub fn resolve(&self, cookie_value: &str) -> Option<AuthSession> {
        let id = self.verify(cookie_value)?;
        {
            let sessions = self.inner.sessions.read();
            let record = sessions.get(&id)?;
            if record.created_at.elapsed() < self.inner.ttl {
                return Some(record.session.clone());
            }
        }
        self.inner.sessions.write().remove(&id);
        None
    }

    /// Drop the session referenced by a cookie value. Quietly does nothing
    /// for invalid or already-cleared cookies.
    pub fn destroy(&self, cookie_value: &str) {
        if let Some(id) = self.verify(cookie_value) {
            self.inner.sessions.write().remove(&id);
        }
    }

    fn sign(&self, id: &Uuid) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.inner.key)
            .expect("hmac accepts any key length");
        mac.update(id.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    fn verify(&self, cookie_value: &str) -> Option<Uuid> {
        let (id_part, sig_part) = cookie_value.split_once('.')?;
        let id = Uuid::parse_str(id_part).ok()?;
        let sig = URL_SAFE_NO_PAD.decode(sig_part).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.inner.key)
            .expect("hmac accepts any key length");
        mac.update(id.as_bytes());
        mac.verify_slice(&sig).ok()?;

        Some(id)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Set-Cookie value establishing a session
pub fn session_cookie(value: &str) -> String {
    format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax")
}

/// Set-Cookie value expiring the session cookie
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session cookie value out of request headers
pub fn cookie_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

// Protected routes take AuthSession as an argument; a missing or invalid
// session rejects with a redirect to /login, a navigation outcome rather
// than an error page.
#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        cookie_from_headers(&parts.headers)
            .and_then(|value| app_state.sessions().resolve(&value))
            .ok_or_else(|| Redirect::to("/login"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_resolve() {
        let store = SessionStore::new();
        let cookie = store.create("ada", "ada@example.com");
        let session = store.resolve(&cookie).expect("session should resolve");
        assert_eq!(session.username, "ada");
        assert_eq!(session.email, "ada@example.com");
    }

    #[test]
    fn tampered_cookie_is_rejected() {
        let store = SessionStore::new();
        let cookie = store.create("ada", "ada@example.com");

        // Flip the id while keeping the original signature
        let (_, sig) = cookie.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert!(store.resolve(&forged).is_none());

        // Garbage values never resolve
        assert!(store.resolve("not-a-cookie").is_none());
        assert!(store.resolve("").is_none());
    }

    #[test]
    fn keys_are_per_store() {
        let store_a = SessionStore::new();
        let store_b = SessionStore::new();
        let cookie = store_a.create("ada", "");
        assert!(store_b.resolve(&cookie).is_none());
    }

    #[test]
    fn expired_sessions_are_evicted_on_lookup() {
        let store = SessionStore::with_ttl(Duration::ZERO);
        let cookie = store.create("ada", "ada@example.com");

        // Past the TTL the lookup fails and the entry is gone, so the map
        // does not accumulate abandoned sessions.
        assert!(store.resolve(&cookie).is_none());
        assert!(store.inner.sessions.read().is_empty());
    }

    #[test]
    fn destroy_clears_the_session() {
        let store = SessionStore::new();
        let cookie = store.create("ada", "");
        store.destroy(&cookie);
        assert!(store.resolve(&cookie).is_none());

        // Destroying again is a no-op
        store.destroy(&cookie);
    }
}
