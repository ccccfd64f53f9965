//! Colors, modifiers and the token theme.

use crate::highlight::Token;
use bitflags::bitflags;
use std::collections::HashMap;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// # Example
    /// ```
    /// use muses::present::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::UNDERLINE;
    /// assert!(style.contains(Modifiers::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0001_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Colors and modifiers of one cell. `None` colors use the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// Style with only a foreground color.
    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Style with a foreground and a background color.
    pub const fn colors(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers.
    #[must_use]
    pub const fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }
}

/// Maps token types to styles, plus the editor chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Style per token type.
    pub tokens: HashMap<String, Style>,
    /// Text with no styled type in its chain.
    pub text: Style,
    /// Color of error squiggles.
    pub error: Rgb,
    /// Unselected popup rows.
    pub popup: Style,
    /// Highlighted popup row.
    pub popup_selected: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let tokens = [
            ("keyword", Style::fg(Rgb::from_u32(0xC6_78DD))),
            ("string", Style::fg(Rgb::from_u32(0x98_C379))),
            ("string_fragment", Style::fg(Rgb::from_u32(0x98_C379))),
            ("template_string", Style::fg(Rgb::from_u32(0x98_C379))),
            ("number", Style::fg(Rgb::from_u32(0xD1_9A66))),
            ("comment", Style::fg(Rgb::from_u32(0x7F_848E)).with(Modifiers::ITALIC)),
            ("property_identifier", Style::fg(Rgb::from_u32(0xE0_6C75))),
            ("identifier", Style::fg(Rgb::from_u32(0xE5_C07B))),
            ("true", Style::fg(Rgb::from_u32(0xD1_9A66))),
            ("false", Style::fg(Rgb::from_u32(0xD1_9A66))),
            ("null", Style::fg(Rgb::from_u32(0xD1_9A66))),
            ("this", Style::fg(Rgb::from_u32(0xE5_C07B))),
        ]
        .into_iter()
        .map(|(kind, style)| (kind.to_string(), style))
        .collect();

        Self {
            tokens,
            text: Style::fg(Rgb::from_u32(0xAB_B2BF)),
            error: Rgb::from_u32(0xE0_6C75),
            popup: Style::colors(Rgb::from_u32(0xAB_B2BF), Rgb::from_u32(0x2C_313A)),
            popup_selected: Style::colors(Rgb::from_u32(0xFF_FFFF), Rgb::from_u32(0x3E_4451)),
        }
    }
}

impl Theme {
    /// Theme with no token colors at all.
    pub fn monochrome() -> Self {
        Self {
            tokens: HashMap::new(),
            text: Style::default(),
            ..Self::default()
        }
    }

    /// Style of a token: the innermost type with an entry wins.
    ///
    /// A call argument nested in a call expression gets the argument's
    /// color, not the call's. Types without an entry (punctuation, plain)
    /// fall through to enclosing ones and finally to [`Theme::text`].
    pub fn style_for(&self, token: &Token) -> Style {
        token
            .types
            .iter()
            .rev()
            .find_map(|kind| self.tokens.get(kind))
            .copied()
            .unwrap_or(self.text)
    }
}
