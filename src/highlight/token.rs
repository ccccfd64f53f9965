//! Token trees and their normalization into render-ready lines.

/// One node of a lexer's output.
///
/// A lexer returns a sequence of these. A `Group` is a matched grammar rule
/// whose children may themselves be groups (a string literal holding an
/// escape sequence, a call expression holding its arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenNode {
    /// Raw text with no classification of its own.
    Leaf(String),
    /// A classified node.
    Group {
        /// Classification tag, e.g. `string` or `keyword`.
        kind: String,
        /// Nested content, in source order.
        children: Vec<TokenNode>,
    },
}

impl TokenNode {
    /// Raw text node.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Classified node with nested children.
    pub fn group(kind: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Group {
            kind: kind.into(),
            children,
        }
    }

    /// Classified node wrapping a single run of text.
    pub fn tagged(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::group(kind, vec![Self::leaf(text)])
    }

    /// Append the source text covered by this node to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Self::Leaf(text) => out.push_str(text),
            Self::Group { children, .. } => {
                for child in children {
                    child.write_text(out);
                }
            }
        }
    }
}

/// Concatenate the source text covered by a token stream.
pub fn stream_text(stream: &[TokenNode]) -> String {
    let mut out = String::new();
    for node in stream {
        node.write_text(&mut out);
    }
    out
}

/// Type tag given to text outside any classified node, and to empty lines.
pub const PLAIN: &str = "plain";

/// A flattened, line-bounded run of classified text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Classification tags of every enclosing node, outermost first.
    pub types: Vec<String>,
    /// Text of this run. Never contains a newline.
    pub content: String,
    /// Set on the placeholder token of an empty line.
    pub empty: bool,
}

impl Token {
    /// Create a token.
    pub fn new(types: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            types,
            content: content.into(),
            empty: false,
        }
    }

    /// Placeholder for a line with no content.
    pub fn empty_line() -> Self {
        Self {
            types: vec![PLAIN.to_string()],
            content: String::new(),
            empty: true,
        }
    }

    /// Innermost classification tag.
    pub fn innermost(&self) -> Option<&str> {
        self.types.last().map(String::as_str)
    }

    /// Check if any enclosing node carries `kind`.
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// One rendered line.
pub type Line = Vec<Token>;

/// Flatten a token tree into per-line leaf tokens.
///
/// Each token carries the full chain of enclosing classifications. Text
/// containing newlines is split at each newline; the newline itself only
/// separates lines. An empty line holds a single [`Token::empty_line`].
///
/// Joining every line's content with `\n` reproduces the source text, and
/// the result always has one more line than the text has newlines.
pub fn normalize_tokens(stream: &[TokenNode]) -> Vec<Line> {
    let mut normalizer = Normalizer::default();
    normalizer.walk(stream, &[]);
    normalizer.finish()
}

#[derive(Default)]
struct Normalizer {
    lines: Vec<Line>,
    current: Line,
}

impl Normalizer {
    fn walk(&mut self, nodes: &[TokenNode], types: &[String]) {
        for node in nodes {
            match node {
                TokenNode::Leaf(text) => {
                    if types.is_empty() {
                        self.push_text(&[PLAIN.to_string()], text);
                    } else {
                        self.push_text(types, text);
                    }
                }
                TokenNode::Group { kind, children } => {
                    let mut chain = types.to_vec();
                    chain.push(kind.clone());
                    self.walk(children, &chain);
                }
            }
        }
    }

    fn push_text(&mut self, types: &[String], text: &str) {
        let mut fragments = text.split('\n');
        if let Some(first) = fragments.next() {
            self.push_fragment(types, first);
        }
        for fragment in fragments {
            self.break_line();
            self.push_fragment(types, fragment);
        }
    }

    fn push_fragment(&mut self, types: &[String], fragment: &str) {
        if !fragment.is_empty() {
            self.current.push(Token::new(types.to_vec(), fragment));
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(close_line(line));
    }

    fn finish(mut self) -> Vec<Line> {
        self.break_line();
        self.lines
    }
}

fn close_line(mut line: Line) -> Line {
    if line.is_empty() {
        line.push(Token::empty_line());
    }
    line
}

/// Rebuild the source text from normalized lines.
pub fn lines_text(lines: &[Line]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for token in line {
            out.push_str(&token.content);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn types(line: &Line) -> Vec<Vec<&str>> {
        line.iter()
            .map(|t| t.types.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_normalize_carries_ancestor_chain() {
        let stream = vec![
            TokenNode::tagged("keyword", "const"),
            TokenNode::leaf(" s = "),
            TokenNode::group(
                "string",
                vec![
                    TokenNode::leaf("\"a"),
                    TokenNode::tagged("escape", "\\n"),
                    TokenNode::leaf("\""),
                ],
            ),
        ];
        let lines = normalize_tokens(&stream);

        assert_eq!(lines.len(), 1);
        assert_eq!(
            types(&lines[0]),
            vec![
                vec!["keyword"],
                vec!["plain"],
                vec!["string"],
                vec!["string", "escape"],
                vec!["string"],
            ]
        );
        assert_eq!(lines_text(&lines), "const s = \"a\\n\"");
    }

    #[test]
    fn test_normalize_splits_multiline_token() {
        let stream = vec![TokenNode::tagged("comment", "/* a\nb */"), TokenNode::leaf("\nx")];
        let lines = normalize_tokens(&stream);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0][0].content, "/* a");
        assert_eq!(lines[1][0].content, "b */");
        assert_eq!(lines[1][0].types, ["comment"]);
        assert_eq!(lines[2][0].content, "x");
        assert_eq!(lines[2][0].types, ["plain"]);
    }

    #[test]
    fn test_normalize_empty_lines() {
        let lines = normalize_tokens(&[TokenNode::leaf("a\n\n")]);
        assert_eq!(lines.len(), 3);
        assert!(!lines[0][0].empty);
        assert_eq!(lines[1], vec![Token::empty_line()]);
        assert_eq!(lines[2], vec![Token::empty_line()]);
        assert_eq!(lines_text(&lines), "a\n\n");
    }

    #[test]
    fn test_normalize_empty_stream() {
        let lines = normalize_tokens(&[]);
        assert_eq!(lines, vec![vec![Token::empty_line()]]);
        assert_eq!(lines_text(&lines), "");
    }

    #[test]
    fn test_stream_text() {
        let stream = vec![
            TokenNode::leaf("a"),
            TokenNode::group("g", vec![TokenNode::tagged("h", "b"), TokenNode::leaf("c")]),
        ];
        assert_eq!(stream_text(&stream), "abc");
    }

    /// Arbitrary token trees over a small alphabet that includes newlines.
    fn arb_stream() -> impl Strategy<Value = Vec<TokenNode>> {
        let leaf = "[ab\n ]{0,5}".prop_map(TokenNode::Leaf);
        let node = leaf.prop_recursive(4, 32, 4, |inner| {
            ("[a-z]{1,6}", prop::collection::vec(inner, 0..4))
                .prop_map(|(kind, children)| TokenNode::Group { kind, children })
        });
        prop::collection::vec(node, 0..6)
    }

    proptest! {
        #[test]
        fn prop_normalize_round_trip(stream in arb_stream()) {
            let text = stream_text(&stream);
            let lines = normalize_tokens(&stream);
            prop_assert_eq!(lines_text(&lines), text);
        }

        #[test]
        fn prop_normalize_line_count(stream in arb_stream()) {
            let text = stream_text(&stream);
            let lines = normalize_tokens(&stream);
            prop_assert_eq!(lines.len(), text.matches('\n').count() + 1);
            for line in &lines {
                prop_assert!(!line.is_empty());
                for token in line {
                    prop_assert!(!token.content.contains('\n'));
                }
            }
        }
    }
}
