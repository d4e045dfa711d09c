//! Line scanner turning raw captured text into styled spans.

use crate::sgr::{apply_sgr, parse_params};
use crate::span::{Line, Span, Style};
use regex::Regex;
use std::sync::LazyLock;

/// `ESC [ <digits and semicolons> m`
static SGR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[([0-9;]*)m").expect("SGR pattern is a valid regex")
});

/// Parse one line into spans.
///
/// Each span carries a snapshot of the style that was active when its text
/// began. Zero-length gaps between sequences produce no span, and an empty
/// line produces no spans at all.
pub fn parse_line(raw: &str) -> Vec<Span> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut state = Style::default();
    let mut last = 0;

    for caps in SGR_REGEX.captures_iter(raw) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::new(&raw[last..whole.start()], state));
        }
        let params = caps.get(1).map_or("", |m| m.as_str());
        apply_sgr(&mut state, &parse_params(params));
        last = whole.end();
    }

    if last < raw.len() {
        spans.push(Span::new(&raw[last..], state));
    }

    spans
}

/// Parse every line independently; style never carries across lines.
pub fn parse_lines<S: AsRef<str>>(raw_lines: &[S]) -> Vec<Line> {
    raw_lines
        .iter()
        .map(|line| Line::new(parse_line(line.as_ref())))
        .collect()
}

/// Remove SGR sequences, leaving the visible text.
pub fn strip_escapes(raw: &str) -> String {
    SGR_REGEX.replace_all(raw, "").into_owned()
}
