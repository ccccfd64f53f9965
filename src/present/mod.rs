//! Present module: drawing snapshots in a terminal.
//!
//! [`Frame::paint`] turns a [`RenderSnapshot`](crate::sequencer::RenderSnapshot)
//! into a grid of styled cells; [`TerminalPresenter`] diffs consecutive frames
//! row by row and writes the changes as ANSI through crossterm.

mod frame;
mod style;
mod terminal;

pub use frame::{Frame, FrameCell, MAX_POPUP_ROWS};
pub use style::{Modifiers, Rgb, Style, Theme};
pub use terminal::{PresentStats, TerminalPresenter};
