//! Session → window → pane selection state machine
//!
//! Selection is consistent top-down: choosing a session clears the window
//! and pane, choosing a window clears the pane. Parent presence is not
//! re-validated when a child is chosen; whoever drives the UI only offers
//! windows of the selected session.

use muxpod_tmux::{PaneTarget, TmuxSession};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    session: Option<String>,
    window: Option<u32>,
    pane: Option<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn window(&self) -> Option<u32> {
        self.window
    }

    pub fn pane(&self) -> Option<u32> {
        self.pane
    }

    /// Nothing selected at any level
    pub fn is_empty(&self) -> bool {
        self.session.is_none() && self.window.is_none() && self.pane.is_none()
    }

    pub fn select_session(&mut self, name: impl Into<String>) {
        self.session = Some(name.into());
        self.window = None;
        self.pane = None;
    }

    pub fn select_window(&mut self, index: u32) {
        self.window = Some(index);
        self.pane = None;
    }

    pub fn select_pane(&mut self, index: u32) {
        self.pane = Some(index);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Seed the selection from the first session, its first window and that
    /// window's first pane (index 0 when not yet fetched)
    ///
    /// Returns `false` without touching anything when `sessions` is empty.
    pub fn auto_select(&mut self, sessions: &[TmuxSession]) -> bool {
        let Some(first) = sessions.first() else {
            return false;
        };
        let window = first.windows.first();
        self.session = Some(first.name.clone());
        self.window = Some(window.map_or(0, |w| w.index));
        self.pane = Some(
            window
                .and_then(|w| w.panes.first())
                .map_or(0, |p| p.index),
        );
        true
    }

    /// The fully selected pane, if every level is set
    pub fn target(&self) -> Option<PaneTarget> {
        Some(PaneTarget::new(
            self.session.clone()?,
            self.window?,
            self.pane?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muxpod_tmux::{TmuxPane, TmuxWindow};

    fn session(name: &str, windows: Vec<TmuxWindow>) -> TmuxSession {
        TmuxSession {
            name: name.into(),
            created_at_ms: 0,
            attached: false,
            window_count: windows.len() as u32,
            windows,
        }
    }

    fn window(index: u32, pane_indexes: &[u32]) -> TmuxWindow {
        TmuxWindow {
            index,
            name: format!("w{index}"),
            active: false,
            pane_count: pane_indexes.len() as u32,
            panes: pane_indexes
                .iter()
                .map(|&i| TmuxPane {
                    index: i,
                    id: format!("%{i}"),
                    active: false,
                    current_command: "zsh".into(),
                    title: "t".into(),
                    width: 80,
                    height: 24,
                    cursor_x: 0,
                    cursor_y: 0,
                })
                .collect(),
        }
    }

    #[test]
    fn test_session_switch_clears_children() {
        let mut sel = Selection::new();
        sel.select_session("a");
        sel.select_window(2);
        sel.select_pane(1);
        assert_eq!(sel.target(), Some(PaneTarget::new("a", 2, 1)));

        sel.select_session("b");
        assert_eq!(sel.session(), Some("b"));
        assert_eq!(sel.window(), None);
        assert_eq!(sel.pane(), None);
        assert_eq!(sel.target(), None);
    }

    #[test]
    fn test_window_switch_clears_pane() {
        let mut sel = Selection::new();
        sel.select_session("a");
        sel.select_window(0);
        sel.select_pane(3);
        sel.select_window(1);
        assert_eq!(sel.window(), Some(1));
        assert_eq!(sel.pane(), None);
    }

    #[test]
    fn test_select_pane_only_sets_pane() {
        let mut sel = Selection::new();
        sel.select_session("a");
        sel.select_window(4);
        sel.select_pane(2);
        sel.select_pane(0);
        assert_eq!(sel.session(), Some("a"));
        assert_eq!(sel.window(), Some(4));
        assert_eq!(sel.pane(), Some(0));
    }

    #[test]
    fn test_auto_select_uses_first_indexes() {
        let mut sel = Selection::new();
        let sessions = vec![
            session("main", vec![window(3, &[5, 6]), window(4, &[0])]),
            session("other", vec![]),
        ];
        assert!(sel.auto_select(&sessions));
        assert_eq!(sel.target(), Some(PaneTarget::new("main", 3, 5)));
    }

    #[test]
    fn test_auto_select_defaults_to_zero() {
        let mut sel = Selection::new();
        assert!(sel.auto_select(&[session("bare", vec![])]));
        assert_eq!(sel.target(), Some(PaneTarget::new("bare", 0, 0)));
    }

    #[test]
    fn test_auto_select_empty_is_noop() {
        let mut sel = Selection::new();
        sel.select_session("kept");
        assert!(!sel.auto_select(&[]));
        assert_eq!(sel.session(), Some("kept"));
    }

    #[test]
    fn test_clear() {
        let mut sel = Selection::new();
        sel.select_session("a");
        sel.select_window(1);
        sel.clear();
        assert!(sel.is_empty());
    }
}
