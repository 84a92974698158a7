//! Account routes
//!
//! Registration, login, and logout. Credential failures are rendered
//! inline on the form that produced them; only infrastructure failures
//! escape as `AppError`.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::auth::{
    clear_session_cookie, cookie_from_headers, hash_password, session_cookie, verify_password,
};
use crate::db::{CredentialRepository, NewCredential, RegisterOutcome};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::views;

/// Create the account router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/SignUp", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

async fn home() -> Html<String> {
    views::signup_page(None)
}

async fn signup_form() -> Html<String> {
    views::signup_page(None)
}

#[derive(Debug, Deserialize)]
struct SignupForm {
    name: String,
    username: String,
    password: String,
    email: String,
}

async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    // Argon2 is deliberately slow; keep it off the async workers
    let password = form.password.clone();
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Task(e.to_string()))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let repo = CredentialRepository::new(state.db());
    let outcome = repo
        .create(&NewCredential {
            name: form.name,
            username: form.username.clone(),
            password: hashed,
            email: form.email,
        })
        .await?;

    match outcome {
        RegisterOutcome::Created => {
            tracing::info!(username = %form.username, "account created");
            Ok(Redirect::to("/login").into_response())
        }
        RegisterOutcome::DuplicateUsername => {
            Ok(views::signup_page(Some("Username already exists")).into_response())
        }
    }
}

async fn login_form() -> Html<String> {
    views::login_page(None)
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response> {
    let repo = CredentialRepository::new(state.db());
    let credential = repo.find_by_username(&form.username).await?;

    // Wrong username and wrong password take the same path so the
    // response never says which one it was.
    let verified = match &credential {
        Some(credential) => {
            let stored = credential.password.clone();
            let supplied = form.password.clone();
            tokio::task::spawn_blocking(move || verify_password(&supplied, &stored))
                .await
                .map_err(|e| AppError::Task(e.to_string()))?
        }
        None => false,
    };

    match credential {
        Some(credential) if verified => {
            let cookie = state.sessions().create(&credential.username, &credential.email);
            tracing::info!(username = %credential.username, "login");
            Ok((
                [(header::SET_COOKIE, session_cookie(&cookie))],
                Redirect::to("/index"),
            )
                .into_response())
        }
        _ => Ok(views::login_page(Some("Invalid username or password")).into_response()),
    }
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(cookie) = cookie_from_headers(&headers) {
        state.sessions().destroy(&cookie);
    }
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}
