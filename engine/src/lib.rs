//! Prompt submission controller.
//!
//! # Architecture
//!
//! The engine owns the one meaningful interaction of the popup: the
//! request/response lifecycle and the persisted-key lifecycle. It drives
//! two injected collaborators and never looks either up itself:
//!
//! - [`UiSurface`] — the presentation layer (input fields, busy indicator,
//!   banner, response area). The engine only reads field values and sets
//!   display state, so the logic is unit-testable without any rendering
//!   environment.
//! - [`PromptBackend`] — the remote call that turns a prompt into text.
//!   Implemented for [`glimpse_client::GeminiClient`].
//!
//! The key store comes from [`glimpse_store::KeyStore`].
//!
//! # State machine
//!
//! `idle → busy → (idle | error)` per submission; a transient `info` state
//! is reachable only from the key-save action. At most one submission is
//! in flight at a time — the submit control is disabled while busy, which
//! is the invariant, not an engine-side lock.
//!
//! All pipeline failures are caught at the controller boundary and become
//! one user-visible banner message; none crash the popup.

mod controller;

pub use controller::{
    BANNER_VISIBLE_FOR, Controller, MSG_EMPTY_API_KEY, MSG_EMPTY_PROMPT, MSG_INVALID_API_KEY,
    MSG_KEY_SAVED, PromptBackend, UiSurface,
};

pub use glimpse_types::{ApiKey, BannerKind, UiStatus};
