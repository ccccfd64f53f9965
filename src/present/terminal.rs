//! Terminal presenter: flushes painted frames as ANSI row diffs.
//!
//! Only rows that differ from the previously presented frame are redrawn,
//! and all output for one snapshot is written with a single flush.

use super::frame::{Frame, FrameCell};
use super::style::{Modifiers, Rgb, Style, Theme};
use crate::sequencer::{RenderSnapshot, SnapshotSink};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use std::io::{self, Write};

/// Statistics about one presented frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentStats {
    /// Rows that were redrawn.
    pub rows_drawn: usize,
    /// Style change sequences emitted.
    pub style_changes: usize,
}

/// Draws snapshots to any [`Write`] as ANSI.
///
/// The presenter never touches terminal modes; raw mode, the alternate
/// screen and cursor visibility are the caller's business.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    theme: Theme,
    width: u16,
    height: u16,
    /// Last presented frame; `None` forces a full redraw.
    previous: Option<Frame>,
}

impl<W: Write> TerminalPresenter<W> {
    /// Create a presenter drawing a `width` x `height` area.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            theme: Theme::default(),
            width,
            height,
            previous: None,
        }
    }

    /// Replace the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self.previous = None;
        self
    }

    /// Resize the drawing area; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.previous = None;
    }

    /// Forget what is on screen.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the presenter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Paint `snapshot` and write the rows that changed.
    pub fn present(&mut self, snapshot: &RenderSnapshot) -> io::Result<PresentStats> {
        let frame = Frame::paint(snapshot, &self.theme, self.width, self.height);
        let mut stats = PresentStats::default();
        let mut pen = Pen::default();

        for y in 0..frame.height() {
            let row = frame.row(y);
            if self.previous.as_ref().is_some_and(|prev| prev.row(y) == row) {
                continue;
            }

            queue!(self.out, MoveTo(0, y))?;
            for cell in row.iter().filter(|cell| !cell.continuation) {
                stats.style_changes += pen.apply(&mut self.out, cell.style)?;
                queue!(self.out, Print(symbol(cell)))?;
            }
            stats.rows_drawn += 1;
        }

        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        self.previous = Some(frame);
        Ok(stats)
    }
}

impl<W: Write> SnapshotSink for TerminalPresenter<W> {
    fn on_snapshot(&mut self, snapshot: &RenderSnapshot) {
        if let Err(err) = self.present(snapshot) {
            tracing::warn!(error = %err, "failed to present snapshot");
            self.previous = None;
        }
    }
}

fn symbol(cell: &FrameCell) -> &str {
    if cell.symbol.is_empty() {
        " "
    } else {
        &cell.symbol
    }
}

/// Tracks the style last written so only changes are emitted.
#[derive(Debug, Default)]
struct Pen {
    current: Option<Style>,
}

impl Pen {
    /// Switch to `style`, returning the number of sequences written.
    fn apply<W: Write>(&mut self, out: &mut W, style: Style) -> io::Result<usize> {
        let previous = self.current.replace(style);
        if previous == Some(style) {
            return Ok(0);
        }

        let mut written = 0;
        let colors_known = match previous {
            Some(prev) if prev.modifiers == style.modifiers => Some(prev),
            Some(prev) if prev.modifiers.difference(style.modifiers).is_empty() => {
                emit_modifiers(out, style.modifiers.difference(prev.modifiers))?;
                written += 1;
                Some(prev)
            }
            _ => {
                // Removing an attribute needs a full reset, which also drops colors.
                queue!(out, SetAttribute(Attribute::Reset))?;
                emit_modifiers(out, style.modifiers)?;
                written += 1;
                None
            }
        };

        if colors_known.map(|prev| prev.fg) != Some(style.fg) {
            queue!(out, SetForegroundColor(color(style.fg)))?;
            written += 1;
        }
        if colors_known.map(|prev| prev.bg) != Some(style.bg) {
            queue!(out, SetBackgroundColor(color(style.bg)))?;
            written += 1;
        }
        Ok(written)
    }
}

fn color(rgb: Option<Rgb>) -> Color {
    rgb.map_or(Color::Reset, |Rgb { r, g, b }| Color::Rgb { r, g, b })
}

fn emit_modifiers<W: Write>(out: &mut W, modifiers: Modifiers) -> io::Result<()> {
    let attributes = [
        (Modifiers::BOLD, Attribute::Bold),
        (Modifiers::DIM, Attribute::Dim),
        (Modifiers::ITALIC, Attribute::Italic),
        (Modifiers::UNDERLINE, Attribute::Underlined),
        (Modifiers::REVERSED, Attribute::Reverse),
    ];
    for (flag, attribute) in attributes {
        if modifiers.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}
