//! tmux command builders for the exec channel
//!
//! Each builder produces the arguments of one tmux invocation. The binary is
//! prepended by [`TmuxCommand::shell_line`], giving a single line suitable for
//! `sh -c` or an SSH exec request. Targets are double-quoted and payloads
//! single-quoted via [`crate::quote`]; nothing else in the crate quotes.

use crate::keys::KeyInput;
use crate::quote::{double_quote, escape_separator, single_quote};
use crate::types::{PaneTarget, WindowTarget};

/// Separator between fields in every `-F` format
pub const FIELD_SEPARATOR: &str = "\t";

/// `list-sessions` format: name, created (seconds), attached, window count
pub const SESSION_FORMAT: &str = concat!(
    "#{session_name}\t",
    "#{session_created}\t",
    "#{session_attached}\t",
    "#{session_windows}"
);

/// `list-windows` format: index, name, active, pane count
pub const WINDOW_FORMAT: &str = concat!(
    "#{window_index}\t",
    "#{window_name}\t",
    "#{window_active}\t",
    "#{window_panes}"
);

/// `list-panes` format: index, id, active, command, title, size, cursor
pub const PANE_FORMAT: &str = concat!(
    "#{pane_index}\t",
    "#{pane_id}\t",
    "#{pane_active}\t",
    "#{pane_current_command}\t",
    "#{pane_title}\t",
    "#{pane_width}\t",
    "#{pane_height}\t",
    "#{cursor_x}\t",
    "#{cursor_y}"
);

/// `display-message` format for the cursor query
pub const CURSOR_FORMAT: &str = "#{cursor_x}\t#{cursor_y}";

/// Line window for `capture-pane`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// `-S`: first line; negative values reach into scrollback
    pub start: Option<i64>,
    /// `-E`: last line
    pub end: Option<i64>,
    /// `-e`: keep SGR escape sequences in the output
    pub escapes: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            escapes: true,
        }
    }
}

impl CaptureOptions {
    /// Visible screen plus `lines` of scrollback, escapes preserved
    pub fn scrollback(lines: usize) -> Self {
        Self {
            start: Some(-(lines as i64)),
            ..Self::default()
        }
    }
}

/// A tmux command ready to be executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmuxCommand {
    /// Everything after the binary name
    args: String,
    /// Whether "no server running" means an empty listing
    listing: bool,
}

impl TmuxCommand {
    fn new(args: impl Into<String>) -> Self {
        Self {
            args: args.into(),
            listing: false,
        }
    }

    fn listing(args: impl Into<String>) -> Self {
        Self {
            args: args.into(),
            listing: true,
        }
    }

    /// The arguments, without the binary
    pub fn as_str(&self) -> &str {
        &self.args
    }

    /// List commands treat a missing server as "nothing to list"
    pub fn is_listing(&self) -> bool {
        self.listing
    }

    /// The full shell line, e.g. `tmux list-sessions -F "..."`
    pub fn shell_line(&self, tmux_path: &str) -> String {
        format!("{} {}", tmux_path, self.args)
    }

    // =========================================================================
    // Listing
    // =========================================================================

    pub fn list_sessions() -> Self {
        Self::listing(format!("list-sessions -F {}", double_quote(SESSION_FORMAT)))
    }

    pub fn list_windows(session: &str) -> Self {
        Self::listing(format!(
            "list-windows -t {} -F {}",
            double_quote(session),
            double_quote(WINDOW_FORMAT)
        ))
    }

    pub fn list_panes(window: &WindowTarget) -> Self {
        Self::listing(format!(
            "list-panes -t {} -F {}",
            double_quote(&window.to_string()),
            double_quote(PANE_FORMAT)
        ))
    }

    // =========================================================================
    // Pane I/O
    // =========================================================================

    /// Capture pane contents to stdout
    pub fn capture_pane(target: &PaneTarget, options: &CaptureOptions) -> Self {
        let mut cmd = String::from("capture-pane -p");
        if options.escapes {
            cmd.push_str(" -e");
        }
        cmd.push_str(&format!(" -t {}", double_quote(&target.to_string())));
        if let Some(start) = options.start {
            cmd.push_str(&format!(" -S {start}"));
        }
        if let Some(end) = options.end {
            cmd.push_str(&format!(" -E {end}"));
        }
        Self::new(cmd)
    }

    /// Send one key input; literal text uses `-l` so tmux does not look up
    /// key names inside it
    ///
    /// The payload follows `--` so a leading `-` is not read as a flag.
    pub fn send_keys(target: &PaneTarget, input: &KeyInput) -> Self {
        let flag = if input.is_literal() { " -l" } else { "" };
        Self::new(format!(
            "send-keys -t {}{} -- {}",
            double_quote(&target.to_string()),
            flag,
            single_quote(&escape_separator(&input.token()))
        ))
    }

    /// Query the cursor position of a pane
    pub fn cursor_position(target: &PaneTarget) -> Self {
        Self::new(format!(
            "display-message -p -t {} {}",
            double_quote(&target.to_string()),
            double_quote(CURSOR_FORMAT)
        ))
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn select_window(window: &WindowTarget) -> Self {
        Self::new(format!(
            "select-window -t {}",
            double_quote(&window.to_string())
        ))
    }

    pub fn select_pane(target: &PaneTarget) -> Self {
        Self::new(format!(
            "select-pane -t {}",
            double_quote(&target.to_string())
        ))
    }

    pub fn resize_pane(target: &PaneTarget, width: u32, height: u32) -> Self {
        Self::new(format!(
            "resize-pane -t {} -x {} -y {}",
            double_quote(&target.to_string()),
            width,
            height
        ))
    }
}
