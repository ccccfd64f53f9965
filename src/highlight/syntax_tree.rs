//! Tree-sitter backed tokenizer.
//!
//! The concrete syntax tree maps directly onto a token tree: every node
//! with children becomes a group named after its grammar rule, text between
//! children becomes raw leaves, and childless nodes become tagged leaves.
//! Incomplete input (the normal state mid-animation) still parses, with
//! `ERROR` groups around the unparsable parts.

use super::token::TokenNode;
use super::tokenizer::{HighlightError, Tokenizer};
use tree_sitter::{Language, Node, Parser};

/// Tokenizer for JavaScript built on tree-sitter.
pub struct SyntaxTreeTokenizer {
    parser: Parser,
    names: &'static [&'static str],
}

impl SyntaxTreeTokenizer {
    /// Language names accepted by [`SyntaxTreeTokenizer::javascript`].
    pub const JAVASCRIPT: &'static [&'static str] = &["javascript", "js", "jsx"];

    /// Create a tokenizer for JavaScript.
    pub fn javascript() -> Result<Self, HighlightError> {
        Self::new(tree_sitter_javascript::LANGUAGE.into(), Self::JAVASCRIPT)
    }

    /// Create a tokenizer for an arbitrary grammar, answering to `names`.
    pub fn new(language: Language, names: &'static [&'static str]) -> Result<Self, HighlightError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| HighlightError::Parser(e.to_string()))?;
        Ok(Self { parser, names })
    }

    /// Check if `language` is served by this tokenizer.
    pub fn supports(&self, language: &str) -> bool {
        self.names.iter().any(|name| name.eq_ignore_ascii_case(language))
    }
}

impl std::fmt::Debug for SyntaxTreeTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTreeTokenizer")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl Tokenizer for SyntaxTreeTokenizer {
    fn tokenize(&mut self, text: &str, language: &str) -> Result<Vec<TokenNode>, HighlightError> {
        if !self.supports(language) {
            return Err(HighlightError::UnsupportedLanguage(language.to_string()));
        }
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let tree = self
            .parser
            .parse(text, None)
            .ok_or_else(|| HighlightError::ParseFailed {
                language: language.to_string(),
            })?;
        let root = tree.root_node();

        // The root may not cover leading or trailing whitespace.
        let mut stream = Vec::with_capacity(3);
        push_gap(&mut stream, text, 0, root.start_byte())?;
        stream.push(convert(root, text)?);
        push_gap(&mut stream, text, root.end_byte(), text.len())?;
        Ok(stream)
    }
}

/// Convert one syntax node (and its subtree) into a token node.
fn convert(node: Node<'_>, source: &str) -> Result<TokenNode, HighlightError> {
    if node.child_count() == 0 {
        let text = slice(source, node.start_byte(), node.end_byte())?;
        return Ok(TokenNode::tagged(leaf_kind(node), text));
    }

    let mut children = Vec::with_capacity(node.child_count());
    let mut pos = node.start_byte();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        push_gap(&mut children, source, pos, child.start_byte())?;
        // Zero-width nodes (inserted by error recovery) carry no text.
        if child.end_byte() > child.start_byte() {
            children.push(convert(child, source)?);
        }
        pos = pos.max(child.end_byte());
    }
    push_gap(&mut children, source, pos, node.end_byte())?;

    Ok(TokenNode::group(node.kind(), children))
}

/// Classification of a childless node.
///
/// Named nodes keep their rule name (`identifier`, `number`, ...).
/// Anonymous nodes are literal grammar text: words are keywords, the rest
/// is punctuation.
fn leaf_kind(node: Node<'_>) -> &'static str {
    let kind = node.kind();
    if node.is_named() {
        kind
    } else if kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        "keyword"
    } else {
        "punctuation"
    }
}

fn push_gap(out: &mut Vec<TokenNode>, source: &str, start: usize, end: usize) -> Result<(), HighlightError> {
    if end > start {
        out.push(TokenNode::leaf(slice(source, start, end)?));
    }
    Ok(())
}

fn slice(source: &str, start: usize, end: usize) -> Result<&str, HighlightError> {
    source
        .get(start..end)
        .ok_or(HighlightError::InvalidRange { start, end })
}
