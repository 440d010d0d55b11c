//! Full-pipeline tests: controller → real file store and real HTTP client
//! against a mock generateContent endpoint.

use glimpse_client::GeminiClient;
use glimpse_engine::{BannerKind, Controller, UiSurface};
use glimpse_store::FileKeyStore;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Minimal popup surface backed by plain mutexes.
#[derive(Default)]
struct TestSurface {
    prompt: Mutex<String>,
    api_key: Mutex<String>,
    busy: Mutex<bool>,
    response: Mutex<String>,
    banner: Mutex<Option<(BannerKind, String)>>,
}

impl UiSurface for TestSurface {
    fn prompt_value(&self) -> String {
        self.prompt.lock().unwrap().clone()
    }

    fn api_key_value(&self) -> String {
        self.api_key.lock().unwrap().clone()
    }

    fn set_api_key_value(&self, value: &str) {
        *self.api_key.lock().unwrap() = value.to_string();
    }

    fn set_busy(&self, busy: bool) {
        *self.busy.lock().unwrap() = busy;
    }

    fn set_response(&self, text: &str) {
        *self.response.lock().unwrap() = text.to_string();
    }

    fn show_banner(&self, kind: BannerKind, message: &str) {
        *self.banner.lock().unwrap() = Some((kind, message.to_string()));
    }

    fn hide_banner(&self) {
        *self.banner.lock().unwrap() = None;
    }
}

fn mock_client(server: &MockServer) -> GeminiClient {
    GeminiClient::new()
        .with_base_url(server.uri())
        .with_model("gemini-2.0-flash")
}

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

#[tokio::test]
async fn submit_round_trip_through_http_and_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "disk-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello" }] } }]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = FileKeyStore::at_path(dir.path().join("storage.json"));

    // First session: user types and saves a key.
    let ui = Arc::new(TestSurface::default());
    *ui.api_key.lock().unwrap() = "disk-key".to_string();
    let ctl = Controller::new(Arc::clone(&ui), store.clone(), mock_client(&server));
    ctl.save_key().await;

    // Second session: popup reopens, key comes back from disk.
    let ui = Arc::new(TestSurface::default());
    *ui.prompt.lock().unwrap() = "Say hi".to_string();
    let ctl = Controller::new(Arc::clone(&ui), store, mock_client(&server));
    ctl.init().await;
    assert_eq!(ui.api_key_value(), "disk-key");

    ctl.submit().await;

    assert_eq!(ui.response.lock().unwrap().as_str(), "Hello");
    assert_eq!(*ui.banner.lock().unwrap(), None);
    assert!(!*ui.busy.lock().unwrap());
}

#[tokio::test]
async fn http_failure_surfaces_status_in_banner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = FileKeyStore::at_path(dir.path().join("storage.json"));

    let ui = Arc::new(TestSurface::default());
    *ui.prompt.lock().unwrap() = "Say hi".to_string();
    *ui.api_key.lock().unwrap() = "a-key".to_string();
    let ctl = Controller::new(Arc::clone(&ui), store, mock_client(&server));

    ctl.submit().await;

    let banner = ui.banner.lock().unwrap().clone();
    let (kind, message) = banner.expect("error banner expected");
    assert_eq!(kind, BannerKind::Error);
    assert!(message.contains("429"), "message was: {message}");
    assert_eq!(ui.response.lock().unwrap().as_str(), "");
    assert!(!*ui.busy.lock().unwrap(), "busy cleared after failure");
}
