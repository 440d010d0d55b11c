//! The controller orchestrating one request lifecycle:
//! validate inputs → set busy → call the remote API → render result or
//! error → clear busy.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glimpse_client::GeminiClient;
use glimpse_store::KeyStore;
use glimpse_types::{ApiKey, BannerKind, UiStatus};

/// How long a banner message stays visible.
pub const BANNER_VISIBLE_FOR: Duration = Duration::from_secs(3);

pub const MSG_EMPTY_PROMPT: &str = "Please enter a prompt";
pub const MSG_EMPTY_API_KEY: &str = "Please enter your API key";
pub const MSG_INVALID_API_KEY: &str = "Please enter a valid API key";
pub const MSG_KEY_SAVED: &str = "API key saved successfully!";

/// The presentation collaborator.
///
/// Implementations use interior mutability; the controller shares the
/// surface with its banner-hide timers, so everything takes `&self`.
pub trait UiSurface: Send + Sync {
    /// Current text of the prompt input field.
    fn prompt_value(&self) -> String;
    /// Current text of the API key input field.
    fn api_key_value(&self) -> String;
    /// Populate the API key field (used when a saved key is loaded).
    fn set_api_key_value(&self, value: &str);
    /// Toggle the busy indicator and the submit control's disabled state.
    fn set_busy(&self, busy: bool);
    /// Replace the response display area content.
    fn set_response(&self, text: &str);
    /// Show the transient banner, replacing any previous message.
    fn show_banner(&self, kind: BannerKind, message: &str);
    /// Hide the banner and clear its text.
    fn hide_banner(&self);
}

/// The remote call collaborator: one prompt in, generated text out.
pub trait PromptBackend: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        api_key: &ApiKey,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}

impl PromptBackend for GeminiClient {
    async fn generate(&self, prompt: &str, api_key: &ApiKey) -> anyhow::Result<String> {
        Ok(GeminiClient::generate(self, prompt, api_key.as_str()).await?)
    }
}

/// Orchestrates the submit and save-key operations over an injected UI
/// surface, key store, and prompt backend.
pub struct Controller<U, S, B> {
    ui: Arc<U>,
    store: S,
    backend: B,
    status: Arc<Mutex<UiStatus>>,
}

impl<U, S, B> Controller<U, S, B>
where
    U: UiSurface + 'static,
    S: KeyStore,
    B: PromptBackend,
{
    pub fn new(ui: Arc<U>, store: S, backend: B) -> Self {
        Self {
            ui,
            store,
            backend,
            status: Arc::new(Mutex::new(UiStatus::Idle)),
        }
    }

    /// Current state-machine status.
    #[must_use]
    pub fn status(&self) -> UiStatus {
        lock_ignore_poison(&self.status).clone()
    }

    /// Popup-open hook: load the persisted key once and populate the key
    /// field. A store failure is logged, not shown; the popup opens with
    /// an empty field.
    pub async fn init(&self) {
        match self.store.load().await {
            Ok(Some(key)) => self.ui.set_api_key_value(key.as_str()),
            Ok(None) => {}
            Err(e) => tracing::warn!("failed to load saved API key: {e}"),
        }
    }

    /// Submit the current prompt to the backend.
    ///
    /// Validation failures never reach the remote call and never enter the
    /// busy state. Once busy is entered it is cleared on both outcomes.
    pub async fn submit(&self) {
        let prompt = self.ui.prompt_value();
        let prompt = prompt.trim();
        let api_key = self.ui.api_key_value();
        let api_key = api_key.trim();

        if prompt.is_empty() {
            self.show_message(BannerKind::Error, MSG_EMPTY_PROMPT);
            return;
        }
        if api_key.is_empty() {
            self.show_message(BannerKind::Error, MSG_EMPTY_API_KEY);
            return;
        }

        self.set_status(UiStatus::Busy);
        self.ui.set_busy(true);
        self.ui.hide_banner();
        self.ui.set_response("");

        let api_key = ApiKey::new(api_key);
        let result = self.backend.generate(prompt, &api_key).await;

        // Re-enable resubmission on both outcomes, before any rendering.
        self.ui.set_busy(false);

        match result {
            Ok(text) => {
                self.ui.set_response(&text);
                self.set_status(UiStatus::Idle);
            }
            Err(e) => {
                tracing::warn!("prompt submission failed: {e:#}");
                self.show_message(BannerKind::Error, &e.to_string());
            }
        }
    }

    /// Persist the key currently in the key field.
    pub async fn save_key(&self) {
        let api_key = self.ui.api_key_value();
        let api_key = api_key.trim();

        if api_key.is_empty() {
            self.show_message(BannerKind::Error, MSG_INVALID_API_KEY);
            return;
        }

        match self.store.save(&ApiKey::new(api_key)).await {
            Ok(()) => self.show_message(BannerKind::Info, MSG_KEY_SAVED),
            Err(e) => {
                tracing::warn!("failed to save API key: {e}");
                self.show_message(BannerKind::Error, &e.to_string());
            }
        }
    }

    /// Show a banner message and arm its hide timer.
    ///
    /// Every call arms an independent timer; timers are NOT cancelled by
    /// later messages, so an earlier timer can hide a later message before
    /// its own three seconds are up. This reproduces the source behavior
    /// (see DESIGN.md) rather than guessing at a fix.
    fn show_message(&self, kind: BannerKind, message: &str) {
        self.set_status(match kind {
            BannerKind::Error => UiStatus::Error(message.to_string()),
            BannerKind::Info => UiStatus::Info(message.to_string()),
        });
        self.ui.show_banner(kind, message);

        let ui = Arc::clone(&self.ui);
        let status = Arc::clone(&self.status);
        tokio::spawn(async move {
            tokio::time::sleep(BANNER_VISIBLE_FOR).await;
            ui.hide_banner();
            let mut status = lock_ignore_poison(&status);
            // A banner expiring must not clobber an in-flight submission.
            if matches!(*status, UiStatus::Error(_) | UiStatus::Info(_)) {
                *status = UiStatus::Idle;
            }
        });
    }

    fn set_status(&self, status: UiStatus) {
        *lock_ignore_poison(&self.status) = status;
    }
}

fn lock_ignore_poison<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
