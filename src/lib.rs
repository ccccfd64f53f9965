//! # Muses
//!
//! Scripted typing animations for a virtual code editor.
//!
//! An [`Animation`] is a list of [`Segment`]s (type text, autocomplete, show
//! an error, move the cursor, clear errors). A [`Sequencer`] replays them
//! against a text buffer on a timed schedule and hands a [`RenderSnapshot`]
//! to a [`SnapshotSink`] after every visible change: text, cursor, error
//! spans, the completion popup and syntax-highlighted lines.
//!
//! ## Core Concepts
//!
//! - **Segments**: declarative, serializable animation steps
//! - **Snapshots**: self-contained editor states, never diffs
//! - **Schedulers**: real sleeps on a thread, or a virtual clock in tests
//! - **Tokenizers**: pluggable lexers whose token trees are normalized into lines
//!
//! ## Example
//!
//! ```rust
//! use muses::{Animation, AnimationConfig, PlainTokenizer, Sequencer, VirtualClock};
//!
//! let animation = Animation::builder(AnimationConfig::default())
//!     .type_text("ab")
//!     .move_cursor(1, 0)
//!     .type_text("X")
//!     .build();
//!
//! let mut snapshots = Vec::new();
//! let report = Sequencer::new(PlainTokenizer, VirtualClock::new())
//!     .play(&animation, &mut snapshots)
//!     .unwrap();
//!
//! assert_eq!(report.state.buffer.text(), "aXb");
//! assert_eq!(snapshots.last().unwrap().cursor, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod autocomplete;
pub mod diagnostics;
pub mod highlight;
pub mod present;
pub mod segment;
pub mod sequencer;
pub mod text;

// Re-exports for convenience
pub use actor::{PlaybackEvent, Player};
pub use autocomplete::CompletionState;
pub use diagnostics::{ErrorSpan, ErrorTracker};
pub use highlight::{HighlightError, Line, PlainTokenizer, SyntaxTreeTokenizer, Token, TokenNode, Tokenizer};
pub use present::{Frame, TerminalPresenter, Theme};
pub use segment::{Animation, AnimationBuilder, AnimationConfig, LoadError, Segment};
pub use sequencer::{
    CancelToken, Delays, RenderSnapshot, RunError, RunReport, Sequencer, SequencerConfig, SnapshotSink,
    ThreadScheduler, VirtualClock,
};
pub use text::{Metrics, Position, TextBuffer};
