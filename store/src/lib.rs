//! Persistent key/value storage for the API key.
//!
//! The store is a pass-through adapter over one fixed identifier: it loads
//! and saves a single string, surviving application restarts. Nothing here
//! validates the key; trimming and non-empty checks are the controller's
//! job.

use glimpse_types::ApiKey;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Identifier the key is stored under, matching the storage document field.
const STORAGE_KEY_ID: &str = "geminiApiKey";

/// Errors from the file-backed store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt storage document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persistence collaborator: get/set of one key, scoped to the
/// application's private storage area.
pub trait KeyStore: Send + Sync {
    /// Retrieve the persisted key, or `None` if never set.
    fn load(&self) -> impl Future<Output = Result<Option<ApiKey>, StoreError>> + Send;

    /// Persist the key under the fixed identifier, overwriting any
    /// previous value. Nothing ever deletes it.
    fn save(&self, key: &ApiKey) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// On-disk document. Carries exactly one field today; serde keeps unknown
/// fields from breaking older or newer readers.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StorageDocument {
    #[serde(rename = "geminiApiKey", skip_serializing_if = "Option::is_none")]
    gemini_api_key: Option<String>,
}

/// JSON-file-backed [`KeyStore`].
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Store at the default location: `<data-dir>/glimpse/storage.json`,
    /// falling back to `./.glimpse/storage.json` when no system data
    /// directory is available.
    #[must_use]
    pub fn new() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from(".glimpse"));
        Self {
            path: base.join("glimpse").join("storage.json"),
        }
    }

    /// Store at an explicit path. Used by tests and one-off setups.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStore for FileKeyStore {
    async fn load(&self) -> Result<Option<ApiKey>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document: StorageDocument = serde_json::from_str(&raw)?;
        Ok(document.gemini_api_key.map(ApiKey::new))
    }

    async fn save(&self, key: &ApiKey) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = StorageDocument {
            gemini_api_key: Some(key.as_str().to_string()),
        };
        let raw = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(&self.path, raw).await?;

        tracing::debug!(id = STORAGE_KEY_ID, path = %self.path.display(), "API key saved");
        Ok(())
    }
}
