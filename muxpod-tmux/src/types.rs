//! Core types for the remote tmux hierarchy
//!
//! These map to tmux's sessions, windows and panes as reported by the
//! `list-*` commands. Child collections are populated lazily: a freshly
//! listed session has no windows until they are fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tmux session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxSession {
    /// Session name (unique per server)
    pub name: String,
    /// Creation time in Unix milliseconds
    pub created_at_ms: i64,
    /// Whether another client is attached
    pub attached: bool,
    /// Number of windows reported by tmux
    pub window_count: u32,
    /// Windows in this session (empty until fetched)
    pub windows: Vec<TmuxWindow>,
}

impl TmuxSession {
    /// Creation time as a UTC timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.created_at_ms)
    }

    /// Find a window by its tmux index
    pub fn window(&self, index: u32) -> Option<&TmuxWindow> {
        self.windows.iter().find(|w| w.index == index)
    }
}

/// A tmux window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxWindow {
    /// Window index (stable per session, not necessarily contiguous)
    pub index: u32,
    /// Window name
    pub name: String,
    /// Whether this is the session's active window
    pub active: bool,
    /// Number of panes reported by tmux
    pub pane_count: u32,
    /// Panes in this window (empty until fetched)
    pub panes: Vec<TmuxPane>,
}

impl TmuxWindow {
    /// Find a pane by its tmux index
    pub fn pane(&self, index: u32) -> Option<&TmuxPane> {
        self.panes.iter().find(|p| p.index == index)
    }
}

/// A tmux pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TmuxPane {
    /// Pane index within its window
    pub index: u32,
    /// Server-wide pane ID (e.g., %3)
    pub id: String,
    /// Whether this pane is active in its window
    pub active: bool,
    /// Current command running in the pane
    pub current_command: String,
    /// Pane title
    pub title: String,
    /// Width in columns
    pub width: u32,
    /// Height in rows
    pub height: u32,
    /// Cursor column
    pub cursor_x: u32,
    /// Cursor row
    pub cursor_y: u32,
}

impl TmuxPane {
    pub fn cursor(&self) -> CursorPosition {
        CursorPosition {
            x: self.cursor_x,
            y: self.cursor_y,
        }
    }
}

/// Cursor position reported by tmux
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: u32,
    pub y: u32,
}

/// Address of a window: `session:window`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowTarget {
    pub session: String,
    pub window_index: u32,
}

impl WindowTarget {
    pub fn new(session: impl Into<String>, window_index: u32) -> Self {
        Self {
            session: session.into(),
            window_index,
        }
    }

    /// Narrow to one pane of this window
    pub fn pane(&self, pane_index: u32) -> PaneTarget {
        PaneTarget::new(self.session.clone(), self.window_index, pane_index)
    }
}

impl fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session, self.window_index)
    }
}

/// Address of a pane: `session:window.pane`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneTarget {
    pub session: String,
    pub window_index: u32,
    pub pane_index: u32,
}

impl PaneTarget {
    pub fn new(session: impl Into<String>, window_index: u32, pane_index: u32) -> Self {
        Self {
            session: session.into(),
            window_index,
            pane_index,
        }
    }

    /// The window containing this pane
    pub fn window(&self) -> WindowTarget {
        WindowTarget::new(self.session.clone(), self.window_index)
    }

    /// Parse a `session:window.pane` string
    ///
    /// The session part is everything before the last `:`, so session names
    /// containing colons still round-trip.
    pub fn parse(s: &str) -> Option<Self> {
        let (session, rest) = s.trim().rsplit_once(':')?;
        if session.is_empty() {
            return None;
        }
        let (window, pane) = rest.split_once('.')?;
        Some(Self::new(session, window.parse().ok()?, pane.parse().ok()?))
    }
}

impl fmt::Display for PaneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}",
            self.session, self.window_index, self.pane_index
        )
    }
}
