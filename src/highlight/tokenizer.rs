//! The tokenizer collaborator seam.

use super::token::{normalize_tokens, stream_text, Line, TokenNode};
use thiserror::Error;

/// Failure of the external tokenizer.
///
/// These are the only failures that abort a run: without valid
/// highlighting there is nothing to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// No grammar is registered for the language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The grammar could not be loaded into the parser.
    #[error("parser setup failed: {0}")]
    Parser(String),

    /// The parser gave up on the input.
    #[error("failed to parse {language} source")]
    ParseFailed {
        /// Language being parsed.
        language: String,
    },

    /// A node's byte range does not address the source text.
    #[error("token range {start}..{end} does not address the source text")]
    InvalidRange {
        /// Range start (bytes).
        start: usize,
        /// Range end (bytes).
        end: usize,
    },

    /// The tree's text does not reproduce the input.
    #[error("token tree covers {actual} bytes but the source has {expected}")]
    Mismatch {
        /// Source length in bytes.
        expected: usize,
        /// Length covered by the tree.
        actual: usize,
    },
}

/// A lexer producing a recursive token tree for a text.
///
/// Implementations are pluggable per language name. They receive the whole
/// buffer on every call.
pub trait Tokenizer {
    /// Lex `text` according to the grammar registered for `language`.
    fn tokenize(&mut self, text: &str, language: &str) -> Result<Vec<TokenNode>, HighlightError>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &mut T {
    fn tokenize(&mut self, text: &str, language: &str) -> Result<Vec<TokenNode>, HighlightError> {
        (**self).tokenize(text, language)
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&mut self, text: &str, language: &str) -> Result<Vec<TokenNode>, HighlightError> {
        (**self).tokenize(text, language)
    }
}

/// Tokenizer that classifies nothing; every language is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&mut self, text: &str, _language: &str) -> Result<Vec<TokenNode>, HighlightError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![TokenNode::leaf(text)])
    }
}

/// Tokenize `text` and normalize the tree into lines.
///
/// The tree must reproduce `text` exactly; a tokenizer that drops or
/// invents text is reported as [`HighlightError::Mismatch`].
pub fn highlight<T: Tokenizer + ?Sized>(
    tokenizer: &mut T,
    text: &str,
    language: &str,
) -> Result<Vec<Line>, HighlightError> {
    let stream = tokenizer.tokenize(text, language)?;
    let covered = stream_text(&stream);
    if covered != text {
        return Err(HighlightError::Mismatch {
            expected: text.len(),
            actual: covered.len(),
        });
    }
    Ok(normalize_tokens(&stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::token::lines_text;

    struct Truncating;

    impl Tokenizer for Truncating {
        fn tokenize(&mut self, text: &str, _: &str) -> Result<Vec<TokenNode>, HighlightError> {
            Ok(vec![TokenNode::leaf(&text[..text.len() / 2])])
        }
    }

    #[test]
    fn test_plain_tokenizer() {
        let lines = highlight(&mut PlainTokenizer, "a\nb", "anything").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].types, ["plain"]);
        assert_eq!(lines_text(&lines), "a\nb");
    }

    #[test]
    fn test_highlight_rejects_mismatched_tree() {
        let err = highlight(&mut Truncating, "abcd", "x").unwrap_err();
        assert_eq!(
            err,
            HighlightError::Mismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_highlight_through_box() {
        let mut tokenizer: Box<dyn Tokenizer> = Box::new(PlainTokenizer);
        let lines = highlight(&mut tokenizer, "", "x").unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0][0].empty);
    }
}
