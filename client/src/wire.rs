//! Typed structures for `generateContent` responses.
//!
//! These types move shape validation to the serde boundary: fields the API
//! may omit are `Option` or default, and extraction returns `None` instead
//! of panicking on a missing element. Fields this client does not consume
//! (finish reasons, safety ratings, usage metadata) are ignored.

use serde::Deserialize;

/// Top-level `generateContent` response.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl Response {
    /// `candidates[0].content.parts[0].text`, or `None` when any element
    /// along that path is absent.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}
