//! Session hierarchy and selection container

use crate::selection::Selection;
use muxpod_tmux::{PaneTarget, TmuxPane, TmuxSession, TmuxWindow};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct SessionState {
    /// Sessions per scope (one scope per connection)
    sessions: HashMap<String, Vec<TmuxSession>>,
    selection: Selection,
    loading: bool,
    error: Option<String>,
}

/// Point-in-time copy of the store for presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub sessions: Vec<TmuxSession>,
    pub selection: Selection,
    pub loading: bool,
    pub error: Option<String>,
}

/// Sessions keyed by scope, plus the shared selection
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Replace a scope's sessions wholesale
    pub fn set_sessions(&self, scope: &str, sessions: Vec<TmuxSession>) {
        self.state.write().sessions.insert(scope.to_string(), sessions);
    }

    pub fn sessions(&self, scope: &str) -> Vec<TmuxSession> {
        self.state
            .read()
            .sessions
            .get(scope)
            .cloned()
            .unwrap_or_default()
    }

    pub fn clear_sessions(&self, scope: &str) {
        self.state.write().sessions.remove(scope);
    }

    /// Replace one session's windows; `false` if the session is unknown
    pub fn set_windows(&self, scope: &str, session: &str, windows: Vec<TmuxWindow>) -> bool {
        let mut state = self.state.write();
        let Some(target) = state
            .sessions
            .get_mut(scope)
            .and_then(|list| list.iter_mut().find(|s| s.name == session))
        else {
            return false;
        };
        target.window_count = windows.len() as u32;
        target.windows = windows;
        true
    }

    /// Replace one window's panes; `false` if the window is unknown
    pub fn set_panes(
        &self,
        scope: &str,
        session: &str,
        window_index: u32,
        panes: Vec<TmuxPane>,
    ) -> bool {
        let mut state = self.state.write();
        let Some(target) = state
            .sessions
            .get_mut(scope)
            .and_then(|list| list.iter_mut().find(|s| s.name == session))
            .and_then(|s| s.windows.iter_mut().find(|w| w.index == window_index))
        else {
            return false;
        };
        target.pane_count = panes.len() as u32;
        target.panes = panes;
        true
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn selection(&self) -> Selection {
        self.state.read().selection.clone()
    }

    pub fn select_session(&self, name: &str) {
        self.state.write().selection.select_session(name);
    }

    pub fn select_window(&self, index: u32) {
        self.state.write().selection.select_window(index);
    }

    pub fn select_pane(&self, index: u32) {
        self.state.write().selection.select_pane(index);
    }

    pub fn clear_selection(&self) {
        self.state.write().selection.clear();
    }

    /// Select the first session/window/pane of `scope` when nothing is
    /// selected yet; returns whether a selection was made
    pub fn auto_select(&self, scope: &str) -> bool {
        let mut state = self.state.write();
        if !state.selection.is_empty() {
            return false;
        }
        let SessionState {
            sessions,
            selection,
            ..
        } = &mut *state;
        match sessions.get(scope) {
            Some(list) => selection.auto_select(list),
            None => false,
        }
    }

    /// The fully selected pane
    pub fn selected_target(&self) -> Option<PaneTarget> {
        self.state.read().selection.target()
    }

    pub fn current_session(&self, scope: &str) -> Option<TmuxSession> {
        let state = self.state.read();
        let name = state.selection.session()?;
        state
            .sessions
            .get(scope)?
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    pub fn current_window(&self, scope: &str) -> Option<TmuxWindow> {
        let index = self.state.read().selection.window()?;
        self.current_session(scope)?
            .windows
            .into_iter()
            .find(|w| w.index == index)
    }

    pub fn current_pane(&self, scope: &str) -> Option<TmuxPane> {
        let index = self.state.read().selection.pane()?;
        self.current_window(scope)?
            .panes
            .into_iter()
            .find(|p| p.index == index)
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn set_loading(&self, loading: bool) {
        self.state.write().loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.write().error = error;
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn snapshot(&self, scope: &str) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            sessions: state.sessions.get(scope).cloned().unwrap_or_default(),
            selection: state.selection.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}
