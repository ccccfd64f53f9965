//! End-to-end replays on a virtual clock.

use muses::highlight::{lines_text, HighlightError, TokenNode};
use muses::sequencer::from_fn;
use muses::{
    Animation, AnimationConfig, ErrorSpan, PlainTokenizer, RenderSnapshot, RunError, Segment, Sequencer,
    SyntaxTreeTokenizer, TextBuffer, Tokenizer, VirtualClock,
};
use proptest::prelude::*;
use std::time::Duration;

const SHOWCASE: &str = include_str!("../demos/showcase.json");

fn builder() -> muses::AnimationBuilder {
    Animation::builder(AnimationConfig::default())
}

fn replay(animation: &Animation) -> (muses::RunReport, Vec<RenderSnapshot>) {
    let mut snapshots = Vec::new();
    let report = Sequencer::new(PlainTokenizer, VirtualClock::new())
        .play(animation, &mut snapshots)
        .unwrap();
    (report, snapshots)
}

#[test]
fn test_insert_in_the_middle() {
    let animation = builder()
        .type_text("ab")
        .move_cursor(1, 0)
        .type_text("X")
        .move_cursor(0, 1)
        .build();
    let (report, snapshots) = replay(&animation);

    assert_eq!(report.state.buffer.text(), "aXb");
    assert_eq!(report.state.buffer.cursor(), 3);
    let last = snapshots.last().unwrap();
    assert_eq!(last.text, "aXb");
    assert_eq!(last.cursor, 3);
}

#[test]
fn test_autocomplete_commits_selection() {
    let animation = builder()
        .type_text("import fs from \"")
        .type_with_autocomplete_select(
            "fs/",
            ["assert", "fs", "fs/promises", "node:fs", "node:fs/promises", "path", "url"],
            "node:fs/promises",
        )
        .build();
    let (report, snapshots) = replay(&animation);

    let popups: Vec<_> = snapshots.iter().filter_map(|s| s.completion.as_ref()).collect();
    // open + 3 keystrokes + 2 selection steps
    assert_eq!(popups.len(), 6);
    assert_eq!(popups[0].filter_text, "");
    assert_eq!(popups[0].visible().len(), 7);
    assert_eq!(popups[3].visible(), ["fs/promises", "node:fs/promises"]);
    assert_eq!(popups[3].highlighted(), Some("fs/promises"));

    let walk: Vec<_> = popups.iter().filter_map(|p| p.selected.as_deref()).collect();
    assert_eq!(walk, ["fs/promises", "node:fs/promises"]);

    let text = "import fs from \"node:fs/promises";
    assert_eq!(report.state.buffer.text(), text);
    assert_eq!(report.state.buffer.cursor(), text.chars().count());
    assert!(snapshots.last().unwrap().completion.is_none());
}

#[test]
fn test_autocomplete_on_empty_buffer() {
    let animation = builder()
        .type_with_autocomplete_select("fs/", ["fs", "fs/promises", "path"], "fs/promises")
        .build();
    let (report, snapshots) = replay(&animation);

    let walk: Vec<_> = snapshots
        .iter()
        .filter_map(|s| s.completion.as_ref()?.selected.clone())
        .collect();
    assert_eq!(walk, ["fs/promises"]);
    assert_eq!(report.state.buffer.text(), "fs/promises");
    assert_eq!(report.state.buffer.cursor(), 11);
    assert_eq!(snapshots.len(), 6);
}

#[test]
fn test_error_span_on_empty_buffer() {
    let animation = builder()
        .type_with_error("contnt", "Cannot find name 'contnt'.")
        .build();
    let (report, snapshots) = replay(&animation);

    let expected = ErrorSpan::new(0, 6, "Cannot find name 'contnt'.");
    assert_eq!(report.state.errors.spans(), [expected.clone()]);
    assert_eq!(snapshots.last().unwrap().errors, [expected]);
}

#[test]
fn test_errors_accumulate_until_cleared() {
    let animation = builder()
        .type_with_error("a", "first")
        .type_text(" ")
        .type_with_error("b", "second")
        .clear_errors()
        .type_text("c")
        .build();
    let (report, snapshots) = replay(&animation);

    let most = snapshots.iter().map(|s| s.errors.len()).max().unwrap();
    assert_eq!(most, 2);
    assert!(report.state.errors.is_empty());
    assert!(snapshots.last().unwrap().errors.is_empty());
    assert_eq!(report.state.buffer.text(), "a bc");
}

#[test]
fn test_cursor_within_buffer() {
    let animation = builder()
        .type_text("héllo\nwörld")
        .move_cursor(100, 0)
        .type_text(">")
        .move_cursor(0, 100)
        .build();
    let (_, snapshots) = replay(&animation);

    for snapshot in &snapshots {
        assert!(snapshot.cursor <= snapshot.text.chars().count());
        assert_eq!(lines_text(&snapshot.lines), snapshot.text);
    }
    let last = snapshots.last().unwrap();
    assert_eq!(last.text, ">héllo\nwörld");
    assert_eq!(last.cursor, 12);
}

#[test]
fn test_typing_delays() {
    let animation = builder().type_text("a b").move_cursor(1, 1).build();
    let mut clock = VirtualClock::new();
    let mut snapshots = Vec::new();
    let report = Sequencer::new(PlainTokenizer, &mut clock)
        .play(&animation, &mut snapshots)
        .unwrap();

    let ms = Duration::from_millis;
    assert_eq!(clock.sleeps(), [ms(100), ms(200), ms(100), ms(200), ms(200)]);
    assert_eq!(report.elapsed, ms(800));
    assert_eq!(clock.now(), ms(800));
}

#[test]
fn test_cancel_from_sink() {
    let animation = builder().type_text("abcdef").build();
    let sequencer = Sequencer::new(PlainTokenizer, VirtualClock::new());
    let token = sequencer.cancel_token();

    let mut seen = 0;
    let mut sink = from_fn(|_: &RenderSnapshot| {
        seen += 1;
        if seen == 3 {
            token.cancel();
        }
    });
    let err = sequencer.play(&animation, &mut sink).unwrap_err();

    assert_eq!(err, RunError::Cancelled { snapshots_emitted: 3 });
    assert_eq!(seen, 3);
}

struct BrokenAfter {
    calls: usize,
    limit: usize,
}

impl Tokenizer for BrokenAfter {
    fn tokenize(&mut self, text: &str, language: &str) -> Result<Vec<TokenNode>, HighlightError> {
        self.calls += 1;
        if self.calls > self.limit {
            return Err(HighlightError::ParseFailed {
                language: language.to_string(),
            });
        }
        Ok(vec![TokenNode::leaf(text)])
    }
}

#[test]
fn test_tokenizer_failure_keeps_prior_snapshots() {
    let animation = builder().type_text("abc").type_text("def").build();
    let mut snapshots = Vec::new();
    let err = Sequencer::new(BrokenAfter { calls: 0, limit: 4 }, VirtualClock::new())
        .play(&animation, &mut snapshots)
        .unwrap_err();

    match err {
        RunError::Highlight {
            snapshots_emitted,
            source,
        } => {
            assert_eq!(snapshots_emitted, 4);
            assert!(matches!(source, HighlightError::ParseFailed { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[3].text, "abcd");
}

#[test]
fn test_showcase_replay() {
    let animation = Animation::from_json(SHOWCASE).unwrap();
    assert_eq!(animation.len(), 14);

    let tokenizer = SyntaxTreeTokenizer::javascript().unwrap();
    let mut snapshots = Vec::new();
    let report = Sequencer::new(tokenizer, VirtualClock::new())
        .play(&animation, &mut snapshots)
        .unwrap();

    let expected = "import fs from \"node:fs/promises\";\n\n\
                    const content = await fs.readFile(\"foo.json\");\n\
                    const parsed = JSON.parse(content);\n\n\
                    console.log(\"Version is: \", parsed.version);";
    assert_eq!(report.state.buffer.text(), expected);
    assert_eq!(report.snapshots_emitted, snapshots.len());

    for snapshot in &snapshots {
        assert_eq!(lines_text(&snapshot.lines), snapshot.text);
    }

    let flagged = snapshots
        .iter()
        .find(|s| !s.errors.is_empty())
        .unwrap();
    assert_eq!(flagged.errors[0].message, "Cannot find name 'contnt'.");

    let last = snapshots.last().unwrap();
    assert!(last.errors.is_empty());
    assert!(last.completion.is_none());
    assert_eq!(last.lines.len(), 6);
    assert!(last.lines[1][0].empty);
    assert!(last.lines[0].iter().any(|t| t.has_type("string")));
}

proptest! {
    #[test]
    fn test_type_text_grows_one_char_per_snapshot(
        prefix in "[a-z \n]{0,8}",
        text in "\\PC{0,16}",
        left in 0usize..10,
    ) {
        let mut buffer = TextBuffer::with_text(&prefix);
        buffer.set_cursor(buffer.len().saturating_sub(left));
        let (base_len, base_cursor) = (buffer.len(), buffer.cursor());

        let mut snapshots = Vec::new();
        let report = Sequencer::new(PlainTokenizer, VirtualClock::new())
            .with_buffer(buffer)
            .run(&[Segment::TypeText { text: text.clone() }], &mut snapshots)
            .unwrap();

        prop_assert_eq!(snapshots.len(), text.chars().count());
        for (i, snapshot) in snapshots.iter().enumerate() {
            prop_assert_eq!(snapshot.text.chars().count(), base_len + i + 1);
            prop_assert_eq!(snapshot.cursor, base_cursor + i + 1);
            prop_assert!(snapshot.cursor <= snapshot.text.chars().count());
        }
        prop_assert_eq!(report.state.buffer.len(), base_len + text.chars().count());
    }
}
