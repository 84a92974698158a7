//! Account registration, login, and logout flows

mod common;

use axum::http::StatusCode;

use common::{register_and_login, spawn_server};

#[tokio::test]
async fn registration_redirects_to_login() {
    let server = spawn_server().await;

    let response = server
        .post("/SignUp")
        .form(&[
            ("name", "Ada Lovelace"),
            ("username", "ada"),
            ("password", "analytical-engine"),
            ("email", "ada@example.com"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/login");
}

#[tokio::test]
async fn duplicate_username_is_rejected_and_record_unchanged() {
    let server = spawn_server().await;

    register_and_login(&server, "ada", "first-password").await;
    server.get("/logout").await;

    let response = server
        .post("/SignUp")
        .form(&[
            ("name", "Imposter"),
            ("username", "ada"),
            ("password", "second-password"),
            ("email", "imposter@example.com"),
        ])
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Username already exists"));

    // The original credential still wins; the duplicate attempt must not
    // have overwritten it.
    let login = server
        .post("/login")
        .form(&[("username", "ada"), ("password", "first-password")])
        .await;
    login.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(login.header("location").to_str().unwrap(), "/index");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_get_the_same_message() {
    let server = spawn_server().await;

    server
        .post("/SignUp")
        .form(&[
            ("name", "Ada"),
            ("username", "ada"),
            ("password", "right-password"),
            ("email", "ada@example.com"),
        ])
        .await;

    let wrong_password = server
        .post("/login")
        .form(&[("username", "ada"), ("password", "wrong-password")])
        .await;
    wrong_password.assert_status_ok();
    assert!(wrong_password.text().contains("Invalid username or password"));

    let unknown_user = server
        .post("/login")
        .form(&[("username", "nobody"), ("password", "whatever")])
        .await;
    unknown_user.assert_status_ok();
    assert!(unknown_user.text().contains("Invalid username or password"));

    // Neither attempt may have established a session
    let index = server.get("/index").await;
    index.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(index.header("location").to_str().unwrap(), "/login");
}

#[tokio::test]
async fn successful_login_reaches_the_landing_page() {
    let server = spawn_server().await;
    register_and_login(&server, "ada", "analytical-engine").await;

    let index = server.get("/index").await;
    index.assert_status_ok();
    assert!(index.text().contains("ada"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = spawn_server().await;
    register_and_login(&server, "ada", "analytical-engine").await;

    let logout = server.get("/logout").await;
    logout.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(logout.header("location").to_str().unwrap(), "/login");

    let index = server.get("/index").await;
    index.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(index.header("location").to_str().unwrap(), "/login");
}

#[tokio::test]
async fn logout_without_a_session_still_redirects() {
    let server = spawn_server().await;

    let logout = server.get("/logout").await;
    logout.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(logout.header("location").to_str().unwrap(), "/login");
}

#[tokio::test]
async fn protected_routes_redirect_to_login() {
    let server = spawn_server().await;

    for path in ["/index", "/contact", "/ocr", "/pdf"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            "/login",
            "{path} should redirect anonymous visitors"
        );
    }
}

#[tokio::test]
async fn public_pages_need_no_session() {
    let server = spawn_server().await;

    server.get("/").await.assert_status_ok();
    server.get("/SignUp").await.assert_status_ok();
    server.get("/login").await.assert_status_ok();
    server.get("/about").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn health_reports_status_and_version() {
    let server = spawn_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
