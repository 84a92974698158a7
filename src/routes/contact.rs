//! Feedback routes
//!
//! The form's email comes from the logged-in session, not from the
//! request, so feedback is always tied to the account that sent it.

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::auth::AuthSession;
use crate::db::{FeedbackRepository, NewFeedback};
use crate::error::Result;
use crate::state::AppState;
use crate::views;

/// Create the contact router
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", get(contact_form).post(submit))
}

async fn contact_form(session: AuthSession) -> Html<String> {
    views::contact_page(&session.email, false)
}

#[derive(Debug, Deserialize)]
struct ContactForm {
    name: String,
    message: String,
}

async fn submit(
    session: AuthSession,
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Html<String>> {
    let repo = FeedbackRepository::new(state.db());
    repo.create(&NewFeedback {
        name: form.name,
        email: session.email.clone(),
        message: form.message,
    })
    .await?;

    tracing::info!(username = %session.username, "feedback recorded");
    Ok(views::contact_page(&session.email, true))
}
