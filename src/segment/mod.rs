//! Segment Model: the declarative vocabulary of a typing animation.
//!
//! An [`Animation`] is a finite, ordered list of [`Segment`]s plus the
//! logical canvas size. Segments are plain data; all behavior lives in
//! the [`Sequencer`](crate::sequencer::Sequencer).
//!
//! The serde representation matches the JSON animation files the demo
//! loads:
//!
//! ```json
//! {
//!   "config": { "height": 300, "width": 600 },
//!   "segments": [
//!     { "kind": "type-text", "text": "import fs from \"" },
//!     { "kind": "type-autocomplete", "text": "fs/",
//!       "completions": ["fs", "fs/promises"], "selectAfter": "fs/promises" }
//!   ]
//! }
//! ```

mod builder;

pub use builder::AnimationBuilder;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A simulated error shown over freshly typed text.
///
/// This is display data, never a real fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Message a renderer may show next to the squiggle.
    pub message: String,
}

impl ErrorMessage {
    /// Create a new error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One declarative step of a typing animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Segment {
    /// Insert `text` one character at a time at the cursor.
    TypeText {
        /// Characters to type.
        text: String,
    },

    /// Type `text` while a completion popup filters `completions`.
    #[serde(rename = "type-autocomplete", rename_all = "camelCase")]
    TypeWithAutocomplete {
        /// Characters to type (also the popup filter).
        text: String,
        /// Candidates, in display order.
        completions: Vec<String>,
        /// Candidate to walk to and commit once typing is done.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        select_after: Option<String>,
    },

    /// Type `text`, then mark the typed range as erroneous.
    #[serde(rename = "type-error")]
    TypeWithError {
        /// Characters to type.
        text: String,
        /// Simulated error attached to the typed range.
        error: ErrorMessage,
    },

    /// Move the cursor relative to its current position.
    MoveCursor {
        /// Characters to move left.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left: Option<usize>,
        /// Characters to move right (applied after `left`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right: Option<usize>,
    },

    /// Remove every active error span.
    ClearErrors,
}

impl Segment {
    /// Stable tag of this segment, as used in the JSON form.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TypeText { .. } => "type-text",
            Self::TypeWithAutocomplete { .. } => "type-autocomplete",
            Self::TypeWithError { .. } => "type-error",
            Self::MoveCursor { .. } => "move-cursor",
            Self::ClearErrors => "clear-errors",
        }
    }
}

/// Logical canvas size of an animation, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Canvas height.
    pub height: u32,
    /// Canvas width.
    pub width: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            height: 300,
            width: 600,
        }
    }
}

/// A complete animation: canvas size plus the ordered segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    /// Canvas size.
    pub config: AnimationConfig,
    /// Segments in replay order.
    pub segments: Vec<Segment>,
}

/// Failure to decode an animation.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input is not a valid animation document.
    #[error("invalid animation document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Animation {
    /// Start building an animation for the given canvas.
    pub fn builder(config: AnimationConfig) -> AnimationBuilder {
        AnimationBuilder::new(config)
    }

    /// Decode an animation from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this animation as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the animation has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
