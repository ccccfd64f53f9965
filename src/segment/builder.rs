//! Ordered construction API for animations.

use super::{Animation, AnimationConfig, ErrorMessage, Segment};

/// Builds an [`Animation`] by appending segments in authoring order.
///
/// # Example
///
/// ```
/// use muses::{Animation, AnimationConfig};
///
/// let animation = Animation::builder(AnimationConfig::default())
///     .type_text("const parsed = JSON.parse(")
///     .type_with_error("contnt", "Cannot find name 'contnt'.")
///     .type_text(");")
///     .move_cursor(4, 0)
///     .type_text("e")
///     .move_cursor(0, 4)
///     .clear_errors()
///     .build();
///
/// assert_eq!(animation.len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct AnimationBuilder {
    config: AnimationConfig,
    segments: Vec<Segment>,
}

impl AnimationBuilder {
    /// Create an empty builder for the given canvas.
    pub const fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            segments: Vec::new(),
        }
    }

    /// Append an arbitrary segment.
    pub fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Type plain text.
    pub fn type_text(self, text: impl Into<String>) -> Self {
        self.push(Segment::TypeText { text: text.into() })
    }

    /// Type text with a completion popup, without committing a candidate.
    pub fn type_with_autocomplete<I, S>(self, text: impl Into<String>, completions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Segment::TypeWithAutocomplete {
            text: text.into(),
            completions: completions.into_iter().map(Into::into).collect(),
            select_after: None,
        })
    }

    /// Type text with a completion popup, then walk to and commit `select_after`.
    pub fn type_with_autocomplete_select<I, S>(
        self,
        text: impl Into<String>,
        completions: I,
        select_after: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Segment::TypeWithAutocomplete {
            text: text.into(),
            completions: completions.into_iter().map(Into::into).collect(),
            select_after: Some(select_after.into()),
        })
    }

    /// Type text and flag it with a simulated error.
    pub fn type_with_error(self, text: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(Segment::TypeWithError {
            text: text.into(),
            error: ErrorMessage::new(message),
        })
    }

    /// Move the cursor left, then right. Zero means "no movement" for that half.
    pub fn move_cursor(self, left: usize, right: usize) -> Self {
        self.push(Segment::MoveCursor {
            left: (left > 0).then_some(left),
            right: (right > 0).then_some(right),
        })
    }

    /// Clear all error spans.
    pub fn clear_errors(self) -> Self {
        self.push(Segment::ClearErrors)
    }

    /// Finish building.
    pub fn build(self) -> Animation {
        Animation {
            config: self.config,
            segments: self.segments,
        }
    }
}
