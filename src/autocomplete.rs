//! Autocomplete Resolver: filtering and selection of completion candidates.
//!
//! Filtering uses substring containment rather than prefix matching, so
//! typing `fs/` keeps both `fs/promises` and `node:fs/promises`.

/// Keep the completions containing `filter_text`, in their original order.
///
/// An empty filter keeps everything.
pub fn filter<'a>(completions: &'a [String], filter_text: &str) -> Vec<&'a str> {
    completions
        .iter()
        .map(String::as_str)
        .filter(|completion| completion.contains(filter_text))
        .collect()
}

/// Completion popup state for one autocomplete segment.
///
/// Recomputed on every keystroke and dropped when the segment ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionState {
    /// All candidates, unfiltered, in display order.
    pub items: Vec<String>,
    /// Text typed so far in this segment.
    pub filter_text: String,
    /// Explicitly selected candidate, if the selection walk has started.
    pub selected: Option<String>,
}

impl CompletionState {
    /// Create an unfiltered popup with no explicit selection.
    pub const fn new(items: Vec<String>) -> Self {
        Self {
            items,
            filter_text: String::new(),
            selected: None,
        }
    }

    /// Candidates visible under the current filter.
    pub fn visible(&self) -> Vec<&str> {
        filter(&self.items, &self.filter_text)
    }

    /// The candidate drawn as highlighted: the explicit selection, or the
    /// first visible candidate.
    pub fn highlighted(&self) -> Option<&str> {
        self.selected
            .as_deref()
            .or_else(|| self.visible().first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_filter_is_containment() {
        let completions = items(&["assert", "fs", "fs/promises", "node:fs", "node:fs/promises", "path"]);
        assert_eq!(filter(&completions, "fs/"), ["fs/promises", "node:fs/promises"]);
        assert_eq!(filter(&completions, "").len(), completions.len());
        assert!(filter(&completions, "zzz").is_empty());
    }

    #[test]
    fn test_highlighted_defaults_to_first_visible() {
        let mut state = CompletionState::new(items(&["readFile", "read", "writeFile"]));
        assert_eq!(state.highlighted(), Some("readFile"));

        state.filter_text = "write".into();
        assert_eq!(state.highlighted(), Some("writeFile"));

        state.selected = Some("read".into());
        assert_eq!(state.highlighted(), Some("read"));
    }

    #[test]
    fn test_highlighted_empty() {
        let state = CompletionState::new(Vec::new());
        assert_eq!(state.highlighted(), None);
        assert!(state.visible().is_empty());
    }

    proptest! {
        #[test]
        fn prop_filter_contains_and_preserves_order(
            completions in prop::collection::vec("[a-c/]{0,6}", 0..12),
            filter_text in "[a-c/]{0,3}",
        ) {
            let filtered = filter(&completions, &filter_text);
            for item in &filtered {
                prop_assert!(item.contains(filter_text.as_str()));
            }

            // Order-preserving subsequence of the original list.
            let mut rest = completions.iter();
            for item in &filtered {
                prop_assert!(rest.any(|c| c.as_str() == *item));
            }

            let expected = completions.iter().filter(|c| c.contains(filter_text.as_str())).count();
            prop_assert_eq!(filtered.len(), expected);
        }
    }
}
