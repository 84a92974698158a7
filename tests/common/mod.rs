//! Shared test setup: a test server over a throwaway database and a
//! scripted OCR engine standing in for Tesseract.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use scantext_server::config::Config;
use scantext_server::db;
use scantext_server::ocr::{OcrEngine, OcrError};
use scantext_server::routes;
use scantext_server::state::AppState;

/// OCR engine that replays a scripted sequence of page texts and counts
/// how often it was invoked.
pub struct ScriptedOcrEngine {
    responses: Mutex<VecDeque<String>>,
    fallback: String,
    calls: AtomicUsize,
}

impl ScriptedOcrEngine {
    pub fn fixed(text: &str) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: text.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn scripted(texts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(texts.iter().map(|t| t.to_string()).collect()),
            fallback: String::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcrEngine {
    async fn is_available(&self) -> bool {
        true
    }

    async fn recognize(&self, _image_data: &[u8]) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }
}

/// Spin up a test server with its own database file and the given engine.
/// Cookies are saved across requests so login flows work.
pub async fn spawn_server_with_engine(engine: Arc<dyn OcrEngine>) -> TestServer {
    // Leaked on purpose; the directory must outlive the server
    let db_dir = Box::leak(Box::new(
        tempfile::tempdir().expect("tempdir should be creatable"),
    ));
    let db_url = format!(
        "sqlite://{}",
        db_dir.path().join("scantext-test.db").display()
    );

    let pool = db::create_pool(&db_url)
        .await
        .expect("test database should initialize");

    let state = AppState::new(Config::default(), pool, engine);
    let mut server =
        TestServer::new(routes::router(state)).expect("test server should start");
    server.do_save_cookies();
    server
}

pub async fn spawn_server() -> TestServer {
    spawn_server_with_engine(ScriptedOcrEngine::fixed("mock text")).await
}

/// Register an account and log in with it
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) {
    server
        .post("/SignUp")
        .form(&[
            ("name", "Test User"),
            ("username", username),
            ("password", password),
            ("email", "test@example.com"),
        ])
        .await;

    let response = server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await;
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/index",
        "login during setup should succeed"
    );
}

/// Build a tiny but well-formed PDF with the given number of empty pages.
/// Object offsets in the xref table are computed, not hard-coded, so the
/// file stays valid regardless of page count.
pub fn blank_pdf(page_count: usize) -> Vec<u8> {
    let mut body = Vec::new();
    let mut offsets = Vec::new();

    body.extend_from_slice(b"%PDF-1.4\n");

    offsets.push(body.len());
    body.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i + 3)).collect();
    offsets.push(body.len());
    body.extend_from_slice(
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            page_count
        )
        .as_bytes(),
    );

    for i in 0..page_count {
        offsets.push(body.len());
        body.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] >>\nendobj\n",
                i + 3
            )
            .as_bytes(),
        );
    }

    let xref_offset = body.len();
    body.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    body.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        body.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    body.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    body
}

/// Encode a small valid PNG for image upload tests
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([255, 255, 255, 255]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )
        .expect("png encoding should succeed");
    out
}
