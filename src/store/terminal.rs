//! Pane-content mirror map

use crate::content::{PaneContent, trim_scrollback};
use muxpod_ansi::Line;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Mirrors keyed by pane id (`session:window.pane`)
///
/// Every publish bumps a counter observable through [`subscribe`], so
/// presentation code can wake on change without polling the map.
///
/// [`subscribe`]: TerminalStore::subscribe
pub struct TerminalStore {
    contents: RwLock<HashMap<String, Arc<PaneContent>>>,
    scrollback_cap: usize,
    published: watch::Sender<u64>,
}

impl TerminalStore {
    pub fn new(scrollback_cap: usize) -> Self {
        let (published, _) = watch::channel(0);
        Self {
            contents: RwLock::new(HashMap::new()),
            scrollback_cap,
            published,
        }
    }

    pub fn scrollback_cap(&self) -> usize {
        self.scrollback_cap
    }

    /// Replace a pane's content wholesale
    pub fn set_content(&self, content: PaneContent) -> Arc<PaneContent> {
        let content = Arc::new(content);
        self.contents
            .write()
            .insert(content.pane_id.clone(), Arc::clone(&content));
        self.notify();
        content
    }

    pub fn content(&self, pane_id: &str) -> Option<Arc<PaneContent>> {
        self.contents.read().get(pane_id).cloned()
    }

    /// Append one line to an existing mirror, evicting the oldest past the
    /// cap; a pane with no mirror is left alone
    pub fn append_line(&self, pane_id: &str, line: Line, now_ms: i64) -> bool {
        let mut contents = self.contents.write();
        let Some(existing) = contents.get(pane_id) else {
            return false;
        };
        let mut lines = existing.lines.clone();
        lines.push(line);
        let lines = trim_scrollback(lines, self.scrollback_cap);
        let updated = PaneContent {
            scrollback_size: lines.len(),
            lines,
            last_updated: now_ms,
            ..(**existing).clone()
        };
        contents.insert(pane_id.to_string(), Arc::new(updated));
        drop(contents);
        self.notify();
        true
    }

    pub fn clear_content(&self, pane_id: &str) -> Option<Arc<PaneContent>> {
        let removed = self.contents.write().remove(pane_id);
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    pub fn clear_all(&self) {
        let mut contents = self.contents.write();
        if contents.is_empty() {
            return;
        }
        contents.clear();
        drop(contents);
        self.notify();
    }

    /// Ids of panes that currently have a mirror, sorted
    pub fn pane_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.contents.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Receiver of the publish counter
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.published.subscribe()
    }

    fn notify(&self) {
        self.published.send_modify(|count| *count += 1);
    }
}

impl Default for TerminalStore {
    fn default() -> Self {
        Self::new(muxpod_config::defaults::scrollback_lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muxpod_ansi::Span;
    use muxpod_tmux::CursorPosition;

    fn content(pane_id: &str, n: usize) -> PaneContent {
        let lines = (0..n)
            .map(|i| Line::new(vec![Span::plain(format!("{i}"))]))
            .collect();
        PaneContent::new(pane_id, lines, usize::MAX, CursorPosition::default(), 1)
    }

    #[test]
    fn test_set_and_get_share_arc() {
        let store = TerminalStore::new(10);
        let published = store.set_content(content("s:0.0", 2));
        let fetched = store.content("s:0.0").unwrap();
        assert!(Arc::ptr_eq(&published, &fetched));
        assert!(store.content("s:0.1").is_none());
    }

    #[test]
    fn test_append_evicts_oldest() {
        let store = TerminalStore::new(3);
        store.set_content(content("p", 3));
        assert!(store.append_line("p", Line::new(vec![Span::plain("new")]), 99));

        let c = store.content("p").unwrap();
        assert_eq!(c.plain_lines(), vec!["1", "2", "new"]);
        assert_eq!(c.scrollback_size, 3);
        assert_eq!(c.last_updated, 99);
    }

    #[test]
    fn test_append_to_missing_pane_is_ignored() {
        let store = TerminalStore::new(3);
        assert!(!store.append_line("nope", Line::default(), 1));
        assert!(store.pane_ids().is_empty());
    }

    #[test]
    fn test_clear() {
        let store = TerminalStore::new(10);
        store.set_content(content("b", 1));
        store.set_content(content("a", 1));
        assert_eq!(store.pane_ids(), vec!["a", "b"]);

        assert!(store.clear_content("a").is_some());
        assert!(store.clear_content("a").is_none());
        assert_eq!(store.pane_ids(), vec!["b"]);

        store.clear_all();
        assert!(store.pane_ids().is_empty());
    }

    #[test]
    fn test_subscribe_sees_publishes() {
        let store = TerminalStore::new(10);
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow_and_update(), 0);

        store.set_content(content("a", 1));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        store.clear_content("missing");
        assert!(!rx.has_changed().unwrap());
    }
}
