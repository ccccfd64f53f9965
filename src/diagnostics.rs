//! Error Tracker: simulated error spans over the buffer.
//!
//! Spans are frozen offsets taken when they were created; later edits do
//! not move them. Overlapping spans are kept as-is.

/// A half-open char range `[start, end)` flagged with a simulated error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorSpan {
    /// First flagged char.
    pub start: usize,
    /// One past the last flagged char.
    pub end: usize,
    /// Message attached to the span.
    pub message: String,
}

impl ErrorSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize, message: impl Into<String>) -> Self {
        Self {
            start,
            end,
            message: message.into(),
        }
    }

    /// Number of chars covered.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span covers nothing.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a char offset falls inside the span.
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Append-only list of active spans, emptied all at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTracker {
    spans: Vec<ErrorSpan>,
}

impl ErrorTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Record a span.
    pub fn push(&mut self, span: ErrorSpan) {
        self.spans.push(span);
    }

    /// Drop every span.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Active spans, oldest first.
    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    /// Number of active spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if no span is active.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
