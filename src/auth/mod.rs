//! Authentication module
//!
//! Password hashing and the cookie-backed session layer.

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password};
pub use session::{
    clear_session_cookie, cookie_from_headers, session_cookie, AuthSession, SessionStore,
    SESSION_COOKIE,
};
