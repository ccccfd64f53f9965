//! Frame: a snapshot painted into a grid of terminal cells.

use super::style::{Modifiers, Style, Theme};
use crate::sequencer::RenderSnapshot;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Most completion rows drawn at once.
pub const MAX_POPUP_ROWS: usize = 6;

/// One terminal cell of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCell {
    /// Grapheme drawn in the cell.
    pub symbol: String,
    /// Cell style.
    pub style: Style,
    /// Second column of a wide grapheme; never drawn on its own.
    pub continuation: bool,
}

impl Default for FrameCell {
    fn default() -> Self {
        Self {
            symbol: String::from(" "),
            style: Style::default(),
            continuation: false,
        }
    }
}

/// A fixed-size grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<FrameCell>,
}

impl Frame {
    /// Create a blank frame.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![FrameCell::default(); usize::from(width) * usize::from(height)],
        }
    }

    /// Width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Cell at (x, y), if inside the frame.
    pub fn get(&self, x: u16, y: u16) -> Option<&FrameCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Cells of row `y` (empty if out of bounds).
    pub fn row(&self, y: u16) -> &[FrameCell] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.cells[start..start + usize::from(self.width)]
    }

    /// Visible text of row `y`, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        let text: String = self
            .row(y)
            .iter()
            .filter(|cell| !cell.continuation)
            .map(|cell| cell.symbol.as_str())
            .collect();
        text.trim_end().to_string()
    }

    /// Paint a snapshot with `theme`.
    ///
    /// Text is drawn from the top-left corner and clipped at the frame
    /// edges. Error spans are underlined in the theme's error color, the
    /// cursor cell is reversed, and an open completion popup is drawn on
    /// the row below the cursor.
    pub fn paint(snapshot: &RenderSnapshot, theme: &Theme, width: u16, height: u16) -> Self {
        let mut frame = Self::new(width, height);
        let mut offset = 0;
        let mut cursor_cell = None;

        for (row, line) in snapshot.lines.iter().enumerate() {
            let y = u16::try_from(row).unwrap_or(u16::MAX);
            let mut x = 0u16;

            for token in line {
                let base = theme.style_for(token);
                for grapheme in token.content.graphemes(true) {
                    let chars = grapheme.chars().count();
                    if cursor_cell.is_none() && (offset..offset + chars).contains(&snapshot.cursor) {
                        cursor_cell = Some((x, y));
                    }

                    let mut style = base;
                    if snapshot.errors.iter().any(|span| span.contains(offset)) {
                        style.fg = Some(theme.error);
                        style.modifiers |= Modifiers::UNDERLINE;
                    }
                    x = frame.put(x, y, grapheme, style);
                    offset += chars;
                }
            }

            if cursor_cell.is_none() && offset == snapshot.cursor {
                cursor_cell = Some((x, y));
            }
            // newline separator
            offset += 1;
        }

        let (cursor_x, cursor_y) = cursor_cell.unwrap_or((0, 0));
        if let Some(cell) = frame.index(cursor_x, cursor_y).map(|i| &mut frame.cells[i]) {
            cell.style.modifiers |= Modifiers::REVERSED;
        }

        if let Some(completion) = &snapshot.completion {
            let visible = completion.visible();
            let highlighted = completion.highlighted();
            let popup_width = visible
                .iter()
                .map(|item| item.width())
                .max()
                .unwrap_or(0)
                + 2;
            let popup_width = u16::try_from(popup_width).unwrap_or(u16::MAX);

            // Scroll so the highlighted row stays in the window.
            let first = visible
                .iter()
                .position(|item| Some(*item) == highlighted)
                .map_or(0, |index| (index + 1).saturating_sub(MAX_POPUP_ROWS));

            for (i, item) in visible.iter().skip(first).take(MAX_POPUP_ROWS).enumerate() {
                let y = cursor_y
                    .saturating_add(1)
                    .saturating_add(u16::try_from(i).unwrap_or(u16::MAX));
                let style = if Some(*item) == highlighted {
                    theme.popup_selected
                } else {
                    theme.popup
                };
                frame.put_padded(cursor_x, y, item, popup_width, style);
            }
        }

        frame
    }

    /// Write one grapheme, returning the next column.
    fn put(&mut self, x: u16, y: u16, grapheme: &str, style: Style) -> u16 {
        let (symbol, width) = match grapheme {
            "\t" => (" ", 1),
            g => (g, g.width().max(1)),
        };
        let width = u16::try_from(width).unwrap_or(1);
        let next = x.saturating_add(width);
        if next > self.width || y >= self.height {
            return next;
        }

        if let Some(i) = self.index(x, y) {
            self.cells[i] = FrameCell {
                symbol: symbol.to_string(),
                style,
                continuation: false,
            };
        }
        for cx in x + 1..next {
            if let Some(i) = self.index(cx, y) {
                self.cells[i] = FrameCell {
                    symbol: String::new(),
                    style,
                    continuation: true,
                };
            }
        }
        next
    }

    /// Write ` text`, padded with `style` to `width` columns.
    fn put_padded(&mut self, x: u16, y: u16, text: &str, width: u16, style: Style) {
        let end = x.saturating_add(width);
        let mut cx = self.put(x, y, " ", style);
        for grapheme in text.graphemes(true) {
            cx = self.put(cx, y, grapheme, style);
        }
        while cx < end {
            cx = self.put(cx, y, " ", style);
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }
}
