//! Key encoding for `send-keys`
//!
//! UI key names map onto tmux key names (`Backspace` is `BSpace`, `PageUp`
//! is `PPage`, ...). Modified keys use tmux's prefixes: `C-` with the key
//! lower-cased for Ctrl, `M-` with the key as given for Alt.

use std::fmt;

/// A named key that tmux understands symbolically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    /// Function key F1 through F12
    F(u8),
}

impl SpecialKey {
    /// Every symbolic key, in display order
    pub const ALL: [SpecialKey; 26] = [
        Self::Enter,
        Self::Escape,
        Self::Tab,
        Self::Backspace,
        Self::Delete,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Home,
        Self::End,
        Self::PageUp,
        Self::PageDown,
        Self::Insert,
        Self::F(1),
        Self::F(2),
        Self::F(3),
        Self::F(4),
        Self::F(5),
        Self::F(6),
        Self::F(7),
        Self::F(8),
        Self::F(9),
        Self::F(10),
        Self::F(11),
        Self::F(12),
    ];

    /// Look up a key by its UI name (`PageUp`, `f5`, `ESCAPE`); case-insensitive
    ///
    /// tmux's own spellings (`BSpace`, `DC`, `PPage`, `NPage`, `IC`) are
    /// accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" => Self::Enter,
            "escape" | "esc" => Self::Escape,
            "tab" => Self::Tab,
            "backspace" | "bspace" => Self::Backspace,
            "delete" | "dc" => Self::Delete,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" | "ppage" => Self::PageUp,
            "pagedown" | "npage" => Self::PageDown,
            "insert" | "ic" => Self::Insert,
            other => {
                let n: u8 = other.strip_prefix('f')?.parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                Self::F(n)
            }
        };
        Some(key)
    }

    /// The key name tmux expects on the `send-keys` command line
    pub fn tmux_name(&self) -> String {
        match self {
            Self::Enter => "Enter".into(),
            Self::Escape => "Escape".into(),
            Self::Tab => "Tab".into(),
            Self::Backspace => "BSpace".into(),
            Self::Delete => "DC".into(),
            Self::Up => "Up".into(),
            Self::Down => "Down".into(),
            Self::Left => "Left".into(),
            Self::Right => "Right".into(),
            Self::Home => "Home".into(),
            Self::End => "End".into(),
            Self::PageUp => "PPage".into(),
            Self::PageDown => "NPage".into(),
            Self::Insert => "IC".into(),
            Self::F(n) => format!("F{n}"),
        }
    }
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tmux_name())
    }
}

/// One unit of input forwarded to a pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// Characters typed verbatim (`send-keys -l`)
    Literal(String),
    /// A named key
    Special(SpecialKey),
    /// Ctrl + key, e.g. `Ctrl("C")` -> `C-c`
    Ctrl(String),
    /// Alt + key, e.g. `Alt("x")` -> `M-x`
    Alt(String),
    /// A raw tmux key name passed through unchanged
    Token(String),
}

impl KeyInput {
    /// Whether this input must be sent with `-l`
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// The payload placed on the command line (before quoting)
    pub fn token(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Special(key) => key.tmux_name(),
            Self::Ctrl(key) => format!("C-{}", key.to_lowercase()),
            Self::Alt(key) => format!("M-{key}"),
            Self::Token(raw) => raw.clone(),
        }
    }
}

impl From<SpecialKey> for KeyInput {
    fn from(key: SpecialKey) -> Self {
        Self::Special(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmux_names() {
        assert_eq!(SpecialKey::Backspace.tmux_name(), "BSpace");
        assert_eq!(SpecialKey::Delete.tmux_name(), "DC");
        assert_eq!(SpecialKey::PageUp.tmux_name(), "PPage");
        assert_eq!(SpecialKey::PageDown.tmux_name(), "NPage");
        assert_eq!(SpecialKey::Insert.tmux_name(), "IC");
        assert_eq!(SpecialKey::F(12).tmux_name(), "F12");
        assert_eq!(SpecialKey::Enter.to_string(), "Enter");
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(SpecialKey::from_name("pageup"), Some(SpecialKey::PageUp));
        assert_eq!(SpecialKey::from_name("ESCAPE"), Some(SpecialKey::Escape));
        assert_eq!(SpecialKey::from_name("BSpace"), Some(SpecialKey::Backspace));
        assert_eq!(SpecialKey::from_name("f7"), Some(SpecialKey::F(7)));
        assert_eq!(SpecialKey::from_name("F13"), None);
        assert_eq!(SpecialKey::from_name("F0"), None);
        assert_eq!(SpecialKey::from_name("Hyper"), None);
    }

    #[test]
    fn test_all_names_round_trip() {
        for key in SpecialKey::ALL {
            assert_eq!(SpecialKey::from_name(&key.tmux_name()), Some(key));
        }
    }

    #[test]
    fn test_modifier_encoding() {
        assert_eq!(KeyInput::Ctrl("C".into()).token(), "C-c");
        assert_eq!(KeyInput::Ctrl("d".into()).token(), "C-d");
        assert_eq!(KeyInput::Alt("X".into()).token(), "M-X");
        assert_eq!(KeyInput::Special(SpecialKey::Up).token(), "Up");
        assert_eq!(KeyInput::Token("C-M-a".into()).token(), "C-M-a");
    }

    #[test]
    fn test_literal_flag() {
        assert!(KeyInput::Literal("ls".into()).is_literal());
        assert!(!KeyInput::from(SpecialKey::Enter).is_literal());
        assert!(!KeyInput::Ctrl("c".into()).is_literal());
    }
}
