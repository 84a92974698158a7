//! Static and landing pages

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::auth::AuthSession;
use crate::state::AppState;
use crate::views;

/// Create the pages router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/index", get(index))
        .route("/about", get(about))
}

async fn index(session: AuthSession) -> Html<String> {
    views::index_page(&session.username)
}

async fn about() -> Html<String> {
    views::about_page()
}
