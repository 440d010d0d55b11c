//! Gemini `generateContent` HTTP client.
//!
//! One prompt in, one block of text out. The client issues a single
//! non-streaming `POST` per call:
//!
//! ```text
//! POST {base_url}/models/{model}:generateContent?key={api_key}
//! { "contents": [{ "parts": [{ "text": <prompt> }] }] }
//! ```
//!
//! and extracts `candidates[0].content.parts[0].text` from the reply
//! through the typed structs in [`wire`]. Any deviation from that shape
//! is an error, never a silent empty result.
//!
//! There is no retry, no backoff, and no streaming here; callers get
//! exactly one request per [`GeminiClient::generate`] call.

pub mod wire;

use serde_json::{Value, json};
use std::sync::OnceLock;
use std::time::Duration;

/// Canonical Gemini API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const CONNECT_TIMEOUT_SECS: u64 = 30;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Errors from a single `generateContent` call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    ///
    /// `status` displays as code plus canonical reason ("400 Bad Request").
    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request could not be sent or the response body could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("invalid API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded but carried no `candidates[0].content.parts[0].text`.
    #[error("API response did not contain any generated text")]
    MissingText,
}

/// Shared HTTP client.
///
/// No total request timeout is set: a hung call hangs the caller. Only a
/// connect timeout guards the dial. Redirects are refused so the API key
/// in the query string cannot leak to a redirect target.
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {e}. Falling back to defaults.");
                reqwest::Client::new()
            })
    })
}

/// Build the `generateContent` request body.
fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Read a failure body, capped so a hostile server cannot balloon memory.
async fn read_capped_error_body(mut response: reqwest::Response) -> String {
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                body.extend_from_slice(&chunk);
                if body.len() > MAX_ERROR_BODY_BYTES {
                    body.truncate(MAX_ERROR_BODY_BYTES);
                    let text = String::from_utf8_lossy(&body);
                    return format!("{text}...(truncated)");
                }
            }
            Ok(None) | Err(_) => break,
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

/// Client for the Gemini `generateContent` endpoint.
///
/// The base URL and model are overridable so tests can point at a mock
/// server; production callers use [`GeminiClient::new`].
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the generated text.
    ///
    /// The API key rides as a query parameter; the full URL is therefore
    /// never logged, only the model name.
    pub async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, ClientError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = build_request_body(prompt);

        tracing::debug!(model = %self.model, "sending generateContent request");

        let response = http_client()
            .post(&url)
            .query(&[("key", api_key)])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            tracing::warn!(%status, "generateContent request rejected");
            return Err(ClientError::Api { status, body });
        }

        let raw = response.text().await?;
        let reply: wire::Response = serde_json::from_str(&raw)?;
        reply.into_text().ok_or(ClientError::MissingText)
    }
}
