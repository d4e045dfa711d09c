use muxpod_ansi::{Style, apply_sgr, parse_line, strip_escapes};
use proptest::prelude::*;

/// Printable text without ESC, so it can never form a sequence by itself.
fn plain_text() -> impl Strategy<Value = String> {
    "[^\x1b]{0,40}"
}

/// A well-formed SGR sequence with up to five numeric parameters.
fn sgr_sequence() -> impl Strategy<Value = String> {
    prop::collection::vec(0u32..=300, 0..5).prop_map(|codes| {
        let params: Vec<String> = codes.iter().map(u32::to_string).collect();
        format!("\x1b[{}m", params.join(";"))
    })
}

fn styled_line() -> impl Strategy<Value = String> {
    prop::collection::vec((sgr_sequence(), plain_text()), 0..6).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(seq, text)| format!("{seq}{text}"))
            .collect()
    })
}

proptest! {
    #[test]
    fn plain_text_yields_one_default_span(text in plain_text()) {
        let spans = parse_line(&text);
        if text.is_empty() {
            prop_assert!(spans.is_empty());
        } else {
            prop_assert_eq!(spans.len(), 1);
            prop_assert_eq!(&spans[0].text, &text);
            prop_assert!(spans[0].style.is_plain());
        }
    }

    #[test]
    fn reset_clears_any_accumulated_state(codes in prop::collection::vec(0u32..=300, 0..12)) {
        let mut style = Style::default();
        apply_sgr(&mut style, &codes);
        apply_sgr(&mut style, &[0]);
        prop_assert!(style.is_plain());
    }

    #[test]
    fn trailing_reset_leaves_plain_tail(line in styled_line(), tail in "[a-z]{1,8}") {
        let spans = parse_line(&format!("{line}\x1b[0m{tail}"));
        let last = spans.last().expect("tail text produces a span");
        prop_assert_eq!(&last.text, &tail);
        prop_assert!(last.style.is_plain());
    }

    #[test]
    fn span_text_matches_stripped_source(line in styled_line()) {
        let spans = parse_line(&line);
        let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(strip_escapes(&joined), strip_escapes(&line));
        prop_assert_eq!(joined, strip_escapes(&line));
        prop_assert!(spans.iter().all(|s| !s.text.is_empty()));
    }
}
