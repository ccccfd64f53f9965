//! Segment Interpreter: replays segments against the buffer on a schedule.

use super::config::SequencerConfig;
use super::scheduler::{CancelToken, Scheduler};
use super::snapshot::{RenderSnapshot, SnapshotSink};
use crate::autocomplete::{filter, CompletionState};
use crate::diagnostics::{ErrorSpan, ErrorTracker};
use crate::highlight::{highlight, HighlightError, Tokenizer};
use crate::segment::{Animation, ErrorMessage, Segment};
use crate::text::TextBuffer;
use std::time::Duration;
use thiserror::Error;

/// Everything a run mutates, owned by exactly one sequencer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterState {
    /// Text and cursor.
    pub buffer: TextBuffer,
    /// Active error spans.
    pub errors: ErrorTracker,
    /// Popup of the running autocomplete segment.
    pub completion: Option<CompletionState>,
}

/// Why a run stopped before its last segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The tokenizer failed; every earlier snapshot was delivered.
    #[error("highlighting failed after {snapshots_emitted} snapshots: {source}")]
    Highlight {
        /// Snapshots delivered before the failure.
        snapshots_emitted: usize,
        /// Tokenizer failure.
        #[source]
        source: HighlightError,
    },

    /// The cancel token was set.
    #[error("playback cancelled after {snapshots_emitted} snapshots")]
    Cancelled {
        /// Snapshots delivered before cancellation.
        snapshots_emitted: usize,
    },
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Final buffer, errors and (always empty) completion state.
    pub state: InterpreterState,
    /// Number of snapshots delivered to the sink.
    pub snapshots_emitted: usize,
    /// Sum of all requested suspensions.
    pub elapsed: Duration,
}

/// Replays a segment sequence, one mutation, one snapshot, one suspension
/// at a time.
///
/// Segments run strictly in order and never overlap. A sequencer performs a
/// single run: [`Sequencer::run`] consumes it.
///
/// Malformed segments never fail a run. Cursor moves saturate at the buffer
/// ends, empty completion lists show an empty popup, and a `select_after`
/// that is not among the filtered candidates is committed without a
/// selection walk.
pub struct Sequencer<T, S> {
    tokenizer: T,
    scheduler: S,
    config: SequencerConfig,
    cancel: CancelToken,
    state: InterpreterState,
    snapshots_emitted: usize,
    elapsed: Duration,
}

impl<T: Tokenizer, S: Scheduler> Sequencer<T, S> {
    /// Create a sequencer with the default configuration.
    pub fn new(tokenizer: T, scheduler: S) -> Self {
        Self::with_config(tokenizer, scheduler, SequencerConfig::default())
    }

    /// Create a sequencer with a custom configuration.
    pub fn with_config(tokenizer: T, scheduler: S, config: SequencerConfig) -> Self {
        Self {
            tokenizer,
            scheduler,
            config,
            cancel: CancelToken::new(),
            state: InterpreterState::default(),
            snapshots_emitted: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Use an externally owned cancel token.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Start from an existing buffer instead of an empty one.
    #[must_use]
    pub fn with_buffer(mut self, buffer: TextBuffer) -> Self {
        self.state.buffer = buffer;
        self
    }

    /// Token that cancels this run.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Current configuration.
    pub const fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Current state.
    pub const fn state(&self) -> &InterpreterState {
        &self.state
    }

    /// Replay every segment of `animation`.
    pub fn play<K: SnapshotSink + ?Sized>(
        self,
        animation: &Animation,
        sink: &mut K,
    ) -> Result<RunReport, RunError> {
        self.run(&animation.segments, sink)
    }

    /// Replay `segments` to completion, delivering every snapshot to `sink`.
    pub fn run<K: SnapshotSink + ?Sized>(
        mut self,
        segments: &[Segment],
        sink: &mut K,
    ) -> Result<RunReport, RunError> {
        for (index, segment) in segments.iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(self.stopped(self.cancelled()));
            }
            tracing::debug!(index, kind = segment.kind(), "run segment");
            if let Err(err) = self.run_segment(segment, sink) {
                return Err(self.stopped(err));
            }
        }

        tracing::info!(
            segments = segments.len(),
            snapshots = self.snapshots_emitted,
            elapsed_ms = u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
            "animation finished"
        );

        Ok(RunReport {
            state: self.state,
            snapshots_emitted: self.snapshots_emitted,
            elapsed: self.elapsed,
        })
    }

    fn stopped(&self, err: RunError) -> RunError {
        tracing::warn!(error = %err, text_len = self.state.buffer.len(), "animation stopped");
        err
    }

    fn run_segment<K: SnapshotSink + ?Sized>(
        &mut self,
        segment: &Segment,
        sink: &mut K,
    ) -> Result<(), RunError> {
        match segment {
            Segment::TypeText { text } => self.type_chars(text, sink),
            Segment::TypeWithAutocomplete {
                text,
                completions,
                select_after,
            } => self.type_with_autocomplete(text, completions, select_after.as_deref(), sink),
            Segment::TypeWithError { text, error } => self.type_with_error(text, error, sink),
            Segment::MoveCursor { left, right } => self.move_cursor(*left, *right, sink),
            Segment::ClearErrors => {
                self.state.errors.clear();
                self.emit(sink)
            }
        }
    }

    /// Insert each char, emitting and pausing after every one.
    fn type_chars<K: SnapshotSink + ?Sized>(&mut self, text: &str, sink: &mut K) -> Result<(), RunError> {
        for c in text.chars() {
            self.state.buffer.insert(c);
            self.emit(sink)?;
            self.sleep(self.config.delays.after_char(c))?;
        }
        Ok(())
    }

    fn type_with_autocomplete<K: SnapshotSink + ?Sized>(
        &mut self,
        text: &str,
        completions: &[String],
        select_after: Option<&str>,
        sink: &mut K,
    ) -> Result<(), RunError> {
        let start = self.state.buffer.cursor();
        let delay = self.config.delays.type_text;

        self.state.completion = Some(CompletionState::new(completions.to_vec()));
        self.emit(sink)?;
        self.sleep(delay)?;

        for c in text.chars() {
            self.state.buffer.insert(c);
            if let Some(completion) = self.state.completion.as_mut() {
                completion.filter_text.push(c);
            }
            self.emit(sink)?;
            self.sleep(delay)?;
        }

        if let Some(target) = select_after.filter(|s| !s.is_empty()) {
            let remaining: Vec<String> = filter(completions, text)
                .into_iter()
                .map(str::to_owned)
                .collect();
            // Inclusive walk: the last highlighted step is the committed candidate.
            let steps = remaining
                .iter()
                .position(|candidate| candidate == target)
                .map_or(0, |index| index + 1);

            for candidate in remaining.into_iter().take(steps) {
                if let Some(completion) = self.state.completion.as_mut() {
                    completion.selected = Some(candidate);
                }
                self.emit(sink)?;
                self.sleep(self.config.delays.select_autocomplete)?;
            }

            let typed = text.chars().count();
            self.state.buffer.replace_range(start..start + typed, target);
        }

        self.state.completion = None;
        self.emit(sink)
    }

    fn type_with_error<K: SnapshotSink + ?Sized>(
        &mut self,
        text: &str,
        error: &ErrorMessage,
        sink: &mut K,
    ) -> Result<(), RunError> {
        let start = self.state.buffer.cursor();
        self.type_chars(text, sink)?;
        let end = self.state.buffer.cursor();

        self.state
            .errors
            .push(ErrorSpan::new(start, end, error.message.clone()));
        self.emit(sink)
    }

    fn move_cursor<K: SnapshotSink + ?Sized>(
        &mut self,
        left: Option<usize>,
        right: Option<usize>,
        sink: &mut K,
    ) -> Result<(), RunError> {
        let delay = self.config.delays.move_cursor;

        if let Some(count) = left.filter(|&n| n > 0) {
            let moved = self.state.buffer.move_left(count);
            if moved < count {
                tracing::debug!(requested = count, moved, "cursor move left saturated");
            }
            self.emit(sink)?;
            self.sleep(delay)?;
        }
        if let Some(count) = right.filter(|&n| n > 0) {
            let moved = self.state.buffer.move_right(count);
            if moved < count {
                tracing::debug!(requested = count, moved, "cursor move right saturated");
            }
            self.sleep(delay)?;
        }

        self.emit(sink)
    }

    /// Highlight the current buffer and deliver a snapshot.
    fn emit<K: SnapshotSink + ?Sized>(&mut self, sink: &mut K) -> Result<(), RunError> {
        let buffer = &self.state.buffer;
        let lines = highlight(&mut self.tokenizer, buffer.text(), &self.config.language).map_err(
            |source| RunError::Highlight {
                snapshots_emitted: self.snapshots_emitted,
                source,
            },
        )?;

        let snapshot = RenderSnapshot {
            text: buffer.text().to_owned(),
            cursor: buffer.cursor(),
            errors: self.state.errors.spans().to_vec(),
            completion: self.state.completion.clone(),
            lines,
        };
        tracing::trace!(
            seq = self.snapshots_emitted,
            cursor = snapshot.cursor,
            errors = snapshot.errors.len(),
            popup = snapshot.completion.is_some(),
            "emit snapshot"
        );

        sink.on_snapshot(&snapshot);
        self.snapshots_emitted += 1;
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) -> Result<(), RunError> {
        if self.scheduler.sleep(duration, &self.cancel).is_err() {
            return Err(self.cancelled());
        }
        self.elapsed = self.elapsed.saturating_add(duration);
        Ok(())
    }

    const fn cancelled(&self) -> RunError {
        RunError::Cancelled {
            snapshots_emitted: self.snapshots_emitted,
        }
    }
}

impl<T, S> std::fmt::Debug for Sequencer<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("snapshots_emitted", &self.snapshots_emitted)
            .finish_non_exhaustive()
    }
}
