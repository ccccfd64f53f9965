//! Sequencer module: the timed replay of an animation.
//!
//! This module contains:
//! - [`Sequencer`]: interprets segments, emitting a [`RenderSnapshot`] after
//!   every visible mutation
//! - [`Scheduler`]: the suspension seam, with [`ThreadScheduler`] for real
//!   time and [`VirtualClock`] for tests
//! - [`SequencerConfig`] and [`Delays`]: timing and language
//!
//! # Example
//!
//! ```
//! use muses::sequencer::{Sequencer, VirtualClock};
//! use muses::highlight::PlainTokenizer;
//! use muses::segment::Segment;
//!
//! let segments = [Segment::TypeText { text: "hi".into() }];
//! let mut snapshots = Vec::new();
//! let report = Sequencer::new(PlainTokenizer, VirtualClock::new())
//!     .run(&segments, &mut snapshots)
//!     .unwrap();
//! assert_eq!(snapshots.len(), 2);
//! assert_eq!(report.state.buffer.text(), "hi");
//! ```

mod config;
mod interpreter;
mod scheduler;
mod snapshot;

pub use config::{Delays, SequencerConfig};
pub use interpreter::{InterpreterState, RunError, RunReport, Sequencer};
pub use scheduler::{CancelToken, Cancelled, Scheduler, ThreadScheduler, VirtualClock};
pub use snapshot::{from_fn, FnSink, RenderSnapshot, SnapshotSink};
