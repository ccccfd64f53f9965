//! Timing and language configuration for a run.

use std::time::Duration;

/// Suspension lengths between animation steps.
///
/// Whitespace pauses longer than other characters, which is what makes the
/// typing read as human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// After an ordinary character (also each autocomplete keystroke).
    pub type_text: Duration,
    /// After a space or newline.
    pub after_blank: Duration,
    /// After each step of the autocomplete selection walk.
    pub select_autocomplete: Duration,
    /// After each half of a cursor move.
    pub move_cursor: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            type_text: Duration::from_millis(100),
            after_blank: Duration::from_millis(200),
            select_autocomplete: Duration::from_millis(200),
            move_cursor: Duration::from_millis(200),
        }
    }
}

impl Delays {
    /// No suspension at all.
    pub const fn instant() -> Self {
        Self {
            type_text: Duration::ZERO,
            after_blank: Duration::ZERO,
            select_autocomplete: Duration::ZERO,
            move_cursor: Duration::ZERO,
        }
    }

    /// Scale every delay by `factor` (e.g. `0.5` plays twice as fast).
    ///
    /// Negative and NaN factors give zero delays; results too large for a
    /// [`Duration`] (including an infinite factor) saturate to [`Duration::MAX`].
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        let scale = |delay: Duration| {
            Duration::try_from_secs_f64(delay.as_secs_f64() * factor).unwrap_or(Duration::MAX)
        };
        Self {
            type_text: scale(self.type_text),
            after_blank: scale(self.after_blank),
            select_autocomplete: scale(self.select_autocomplete),
            move_cursor: scale(self.move_cursor),
        }
    }

    /// Suspension after typing `c`.
    pub const fn after_char(&self, c: char) -> Duration {
        match c {
            ' ' | '\n' => self.after_blank,
            _ => self.type_text,
        }
    }
}

/// Configuration for a [`Sequencer`](super::Sequencer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Step timing.
    pub delays: Delays,
    /// Language name handed to the tokenizer.
    pub language: String,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            delays: Delays::default(),
            language: String::from("javascript"),
        }
    }
}

impl SequencerConfig {
    /// Replace the delays.
    #[must_use]
    pub const fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    /// Replace the language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_pauses_longer() {
        let delays = Delays::default();
        assert!(delays.after_char(' ') > delays.after_char('a'));
        assert_eq!(delays.after_char('\n'), delays.after_blank);
        assert_eq!(delays.after_char('\t'), delays.type_text);
    }

    #[test]
    fn test_scaled() {
        let delays = Delays::default().scaled(0.5);
        assert_eq!(delays.type_text, Duration::from_millis(50));
        assert_eq!(delays.after_blank, Duration::from_millis(100));
        assert_eq!(Delays::default().scaled(-1.0), Delays::instant());
        assert_eq!(Delays::default().scaled(f64::NAN), Delays::instant());
    }

    #[test]
    fn test_scaled_saturates() {
        let huge = Delays::default().scaled(1e30);
        assert_eq!(huge.type_text, Duration::MAX);
        assert_eq!(huge.move_cursor, Duration::MAX);
        assert_eq!(Delays::default().scaled(f64::INFINITY).after_blank, Duration::MAX);
    }
}
