//! The pane-content mirror published by the sync engine

use muxpod_ansi::Line;
use muxpod_tmux::CursorPosition;
use serde::{Deserialize, Serialize};

/// One pane's mirrored content
///
/// Replaced wholesale on every detected change; holders of an older
/// `Arc<PaneContent>` keep seeing the snapshot they were given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneContent {
    /// `session:window.pane`
    pub pane_id: String,
    pub lines: Vec<Line>,
    /// Number of retained lines (never above the scrollback cap)
    pub scrollback_size: usize,
    pub cursor_x: u32,
    pub cursor_y: u32,
    /// Unix milliseconds of the last publish
    pub last_updated: i64,
}

impl PaneContent {
    /// Build from parsed lines, keeping at most `cap` of the newest
    pub fn new(
        pane_id: impl Into<String>,
        lines: Vec<Line>,
        cap: usize,
        cursor: CursorPosition,
        now_ms: i64,
    ) -> Self {
        let lines = trim_scrollback(lines, cap);
        Self {
            pane_id: pane_id.into(),
            scrollback_size: lines.len(),
            lines,
            cursor_x: cursor.x,
            cursor_y: cursor.y,
            last_updated: now_ms,
        }
    }

    pub fn cursor(&self) -> CursorPosition {
        CursorPosition {
            x: self.cursor_x,
            y: self.cursor_y,
        }
    }

    /// Visible text of each line, styling dropped
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(Line::text).collect()
    }
}

/// Keep the newest `cap` entries, oldest evicted first, order preserved
pub fn trim_scrollback<T>(mut lines: Vec<T>, cap: usize) -> Vec<T> {
    if lines.len() > cap {
        let excess = lines.len() - cap;
        lines.drain(..excess);
    }
    lines
}
