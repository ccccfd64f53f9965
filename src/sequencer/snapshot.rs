//! Render snapshots and the sink they are delivered to.

use crate::autocomplete::CompletionState;
use crate::diagnostics::ErrorSpan;
use crate::highlight::Line;
use crate::text::{position_of, Position};

/// Complete, immutable view of the editor after one mutation.
///
/// Each snapshot stands alone (it is not a diff), so a renderer that falls
/// behind can skip straight to the newest one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderSnapshot {
    /// Buffer text.
    pub text: String,
    /// Cursor offset (chars).
    pub cursor: usize,
    /// Active error spans, oldest first.
    pub errors: Vec<ErrorSpan>,
    /// Completion popup, while an autocomplete segment is running.
    pub completion: Option<CompletionState>,
    /// Highlighted text, one entry per line.
    pub lines: Vec<Line>,
}

impl RenderSnapshot {
    /// Row and column of the cursor.
    pub fn cursor_position(&self) -> Position {
        position_of(&self.text, self.cursor)
    }
}

/// Receiver of snapshots, invoked synchronously at every emission point.
pub trait SnapshotSink {
    /// Handle one snapshot. The snapshot must be treated as read-only.
    fn on_snapshot(&mut self, snapshot: &RenderSnapshot);
}

impl SnapshotSink for Vec<RenderSnapshot> {
    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        self.push(snapshot.clone());
    }
}

/// Adapter turning a closure into a [`SnapshotSink`].
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F: FnMut(&RenderSnapshot)> SnapshotSink for FnSink<F> {
    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        (self.0)(snapshot);
    }
}

/// Wrap a closure as a sink.
pub const fn from_fn<F: FnMut(&RenderSnapshot)>(f: F) -> FnSink<F> {
    FnSink(f)
}
