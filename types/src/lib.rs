//! Core domain types for Glimpse.
//!
//! This crate contains pure domain types with no IO, no async, and no
//! dependencies. Everything here can be used from any layer of the
//! application.

use std::fmt;

// ============================================================================
// API Key
// ============================================================================

/// An opaque, user-supplied API key.
///
/// Note: `Debug` is manually implemented to redact the key value, preventing
/// accidental credential disclosure in logs or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(<redacted>)")
    }
}

// ============================================================================
// UI Status
// ============================================================================

/// Visual style of the transient message banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Warning color; validation and pipeline failures.
    Error,
    /// Confirmation color; currently only the key-saved message.
    Info,
}

/// Mutually exclusive transient UI states.
///
/// Only one status is visible at a time. `Error` and `Info` carry the
/// banner message they were shown with; the banner itself auto-expires,
/// reverting the display to hidden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    Busy,
    Error(String),
    Info(String),
}

impl UiStatus {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, UiStatus::Busy)
    }

    /// The banner message carried by this status, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            UiStatus::Error(msg) | UiStatus::Info(msg) => Some(msg),
            UiStatus::Idle | UiStatus::Busy => None,
        }
    }

    /// The banner style matching this status, if one should be visible.
    #[must_use]
    pub fn banner_kind(&self) -> Option<BannerKind> {
        match self {
            UiStatus::Error(_) => Some(BannerKind::Error),
            UiStatus::Info(_) => Some(BannerKind::Info),
            UiStatus::Idle | UiStatus::Busy => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiKey, BannerKind, UiStatus};

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-very-secret");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn api_key_round_trips_value() {
        let key = ApiKey::new("abc123");
        assert_eq!(key.as_str(), "abc123");
        assert_eq!(key.into_inner(), "abc123");
    }

    #[test]
    fn status_default_is_idle() {
        assert_eq!(UiStatus::default(), UiStatus::Idle);
        assert!(!UiStatus::Idle.is_busy());
        assert!(UiStatus::Busy.is_busy());
    }

    #[test]
    fn status_message_and_kind() {
        let err = UiStatus::Error("boom".to_string());
        assert_eq!(err.message(), Some("boom"));
        assert_eq!(err.banner_kind(), Some(BannerKind::Error));

        let info = UiStatus::Info("saved".to_string());
        assert_eq!(info.banner_kind(), Some(BannerKind::Info));

        assert_eq!(UiStatus::Busy.message(), None);
        assert_eq!(UiStatus::Idle.banner_kind(), None);
    }
}
