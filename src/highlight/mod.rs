//! Highlight module: lexer output normalized into render-ready lines.
//!
//! This module contains:
//! - [`TokenNode`]: the recursive token tree an external lexer produces
//! - [`normalize_tokens`]: flattening into per-line [`Token`]s that keep the
//!   full chain of enclosing classifications
//! - [`Tokenizer`]: the pluggable lexer seam, with [`PlainTokenizer`] and the
//!   tree-sitter backed [`SyntaxTreeTokenizer`]
//!
//! # Example
//!
//! ```
//! use muses::highlight::{normalize_tokens, TokenNode};
//!
//! let stream = vec![
//!     TokenNode::tagged("keyword", "const"),
//!     TokenNode::leaf(" x;\n"),
//! ];
//! let lines = normalize_tokens(&stream);
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0][0].types, ["keyword"]);
//! ```

mod syntax_tree;
mod token;
mod tokenizer;

pub use syntax_tree::SyntaxTreeTokenizer;
pub use token::{lines_text, normalize_tokens, stream_text, Line, Token, TokenNode, PLAIN};
pub use tokenizer::{highlight, HighlightError, PlainTokenizer, Tokenizer};
