//! Text module: the virtual buffer and its geometry.
//!
//! This module contains:
//! - [`TextBuffer`]: insertion-point buffer with a saturating cursor
//! - [`position_of`] and [`Metrics`]: offset to row/column to layout coordinates

mod buffer;
mod geometry;

pub use buffer::TextBuffer;
pub use geometry::{position_of, Metrics, Point, Position, SpanRect};
