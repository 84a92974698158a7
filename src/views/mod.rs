//! HTML page rendering
//!
//! Pages are small enough that they are assembled inline and returned as
//! `Html<String>`; user-supplied values are escaped before insertion.

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute, encode_text};

fn layout(title: &str, nav: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Scantext</title>
</head>
<body>
<nav>{nav}</nav>
<main>
{body}
</main>
</body>
</html>"#
    ))
}

const NAV_PUBLIC: &str = r#"<a href="/login">Log in</a> | <a href="/SignUp">Sign up</a> | <a href="/about">About</a>"#;
const NAV_AUTHED: &str = r#"<a href="/index">Home</a> | <a href="/ocr">Image OCR</a> | <a href="/pdf">PDF OCR</a> | <a href="/contact">Contact</a> | <a href="/about">About</a> | <a href="/logout">Log out</a>"#;

fn error_block(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, encode_text(message)),
        None => String::new(),
    }
}

/// Signup page, optionally with an inline error
pub fn signup_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Sign up</h1>
{}
<form method="post" action="/SignUp">
<label>Name <input type="text" name="name" required></label>
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<label>Email <input type="email" name="email" required></label>
<button type="submit">Sign up</button>
</form>"#,
        error_block(error)
    );
    layout("Sign up", NAV_PUBLIC, &body)
}

/// Login page, optionally with an inline error
pub fn login_page(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Log in</h1>
{}
<form method="post" action="/login">
<label>Username <input type="text" name="username" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>"#,
        error_block(error)
    );
    layout("Log in", NAV_PUBLIC, &body)
}

/// Authenticated landing page
pub fn index_page(name: &str) -> Html<String> {
    let body = format!(
        r#"<h1>Welcome, {}</h1>
<p>Upload an <a href="/ocr">image</a> or a <a href="/pdf">PDF</a> to extract its text.</p>"#,
        encode_text(name)
    );
    layout("Home", NAV_AUTHED, &body)
}

/// Static info page
pub fn about_page() -> Html<String> {
    let body = r#"<h1>About Scantext</h1>
<p>Scantext extracts machine-readable text from uploaded images and PDF
documents using the Tesseract recognition engine.</p>"#;
    layout("About", NAV_PUBLIC, body)
}

/// Contact form with the session email shown as read-only context
pub fn contact_page(email: &str, submitted: bool) -> Html<String> {
    let acknowledgment = if submitted {
        r#"<p class="success">Thank you for your feedback!</p>"#
    } else {
        ""
    };
    let body = format!(
        r#"<h1>Contact</h1>
{acknowledgment}
<form method="post" action="/contact">
<label>Name <input type="text" name="name" required></label>
<label>Email <input type="email" value="{}" readonly></label>
<label>Message <textarea name="message" required></textarea></label>
<button type="submit">Send</button>
</form>"#,
        encode_double_quoted_attribute(email)
    );
    layout("Contact", NAV_AUTHED, &body)
}

/// Image OCR page with upload form, result, and download button
pub fn ocr_page(extracted_text: Option<&str>, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Image OCR</h1>
{}
<form method="post" action="/ocr" enctype="multipart/form-data">
<label>Image <input type="file" name="image"></label>
<button type="submit">Extract text</button>
</form>
{}"#,
        error_block(error),
        result_block(extracted_text, "/download_ocr")
    );
    layout("Image OCR", NAV_AUTHED, &body)
}

/// PDF OCR page with upload form, result, and download button
pub fn pdf_page(extracted_text: Option<&str>, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>PDF OCR</h1>
{}
<form method="post" action="/pdf" enctype="multipart/form-data">
<label>PDF <input type="file" name="pdf"></label>
<button type="submit">Extract text</button>
</form>
{}"#,
        error_block(error),
        result_block(extracted_text, "/download_pdf")
    );
    layout("PDF OCR", NAV_AUTHED, &body)
}

fn result_block(extracted_text: Option<&str>, download_action: &str) -> String {
    match extracted_text {
        Some(text) => format!(
            r#"<h2>Extracted text</h2>
<pre>{}</pre>
<form method="post" action="{download_action}">
<input type="hidden" name="extracted_text" value="{}">
<button type="submit">Download as .txt</button>
</form>"#,
            encode_text(text),
            encode_double_quoted_attribute(text)
        ),
        None => String::new(),
    }
}
