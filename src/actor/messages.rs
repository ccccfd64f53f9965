//! Events flowing from the player thread to its consumer.

use crate::sequencer::{RenderSnapshot, RunError, RunReport, SnapshotSink};
use crossbeam_channel::Sender;

/// Event published by a [`Player`](super::Player).
///
/// Exactly one terminal event ([`Finished`](Self::Finished),
/// [`Stopped`](Self::Stopped) or [`Panicked`](Self::Panicked)) follows the
/// last snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A new editor state to draw.
    Snapshot(Box<RenderSnapshot>),
    /// Every segment ran.
    Finished(Box<RunReport>),
    /// Playback ended early, through cancellation or a tokenizer failure.
    Stopped(RunError),
    /// The playback thread panicked or exited without reporting.
    Panicked(String),
}

impl PlaybackEvent {
    /// Check if this is the last event of a playback.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Snapshot(_))
    }
}

impl SnapshotSink for Sender<PlaybackEvent> {
    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        // Consumer gone; playback keeps its timing regardless.
        if self
            .send(PlaybackEvent::Snapshot(Box::new(snapshot.clone())))
            .is_err()
        {
            tracing::trace!("snapshot dropped, receiver disconnected");
        }
    }
}
