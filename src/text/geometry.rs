//! Text Geometry: buffer offsets to rows, columns and layout coordinates.
//!
//! Everything here is a pure function of its inputs. Rows and columns are
//! counted in chars; [`Metrics`] scales them by a fixed monospaced cell.

/// A (row, column) location in a text, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Number of newlines strictly before the offset.
    pub row: usize,
    /// Chars since the last newline before the offset.
    pub col: usize,
}

/// Resolve a char offset in `text` to its row and column.
///
/// Offsets past the end resolve to the end of the text.
pub fn position_of(text: &str, offset: usize) -> Position {
    let mut position = Position::default();
    for c in text.chars().take(offset) {
        if c == '\n' {
            position.row += 1;
            position.col = 0;
        } else {
            position.col += 1;
        }
    }
    position
}

/// A point in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal distance from the left edge.
    pub left: f32,
    /// Vertical distance from the top edge.
    pub top: f32,
}

/// An axis-aligned rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpanRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width (never negative).
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Monospaced cell metrics used to lay out text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Width of one character cell.
    pub cell_width: f32,
    /// Height of one line.
    pub line_height: f32,
    /// Vertical gap between the cursor's top edge and a completion popup.
    pub popup_offset: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            cell_width: 7.225,
            line_height: 18.0,
            popup_offset: 14.0,
        }
    }
}

impl Metrics {
    /// Layout coordinates of the top-left corner of the cell at `offset`.
    #[allow(clippy::cast_precision_loss)]
    pub fn point_for(&self, text: &str, offset: usize) -> Point {
        let Position { row, col } = position_of(text, offset);
        Point {
            left: col as f32 * self.cell_width,
            top: row as f32 * self.line_height,
        }
    }

    /// Where a completion popup opened at `cursor` should be anchored.
    pub fn completion_anchor(&self, text: &str, cursor: usize) -> Point {
        let point = self.point_for(text, cursor);
        Point {
            left: point.left,
            top: point.top + self.popup_offset,
        }
    }

    /// Rectangle underlining `[start, end)`, one line tall on the start row.
    pub fn span_rect(&self, text: &str, start: usize, end: usize) -> SpanRect {
        let from = self.point_for(text, start);
        let to = self.point_for(text, end);
        SpanRect {
            left: from.left,
            top: from.top,
            width: (to.left - from.left).max(0.0),
            height: self.line_height,
        }
    }
}
