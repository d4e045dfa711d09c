//! Styled text model produced by the parser.

use serde::{Deserialize, Serialize};

/// Palette index in the 256-colour xterm palette.
pub type ColorIndex = u8;

const RESET: &str = "\x1b[0m";

/// Style state active for a run of text.
///
/// `Style::default()` is the empty state: no colours, no attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    /// Foreground palette index (`None` = terminal default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<ColorIndex>,
    /// Background palette index (`None` = terminal default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ColorIndex>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub dim: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub blink: bool,
    #[serde(default)]
    pub inverse: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub strikethrough: bool,
}

impl Style {
    /// True when no colour or attribute is set.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// SGR sequence that puts a terminal into exactly this style (empty when
    /// plain). Colours are always written in 256-colour form.
    pub fn to_sgr(&self) -> String {
        if self.is_plain() {
            return String::new();
        }
        let mut params = vec!["0".to_string()];
        let flags = [
            (self.bold, "1"),
            (self.dim, "2"),
            (self.italic, "3"),
            (self.underline, "4"),
            (self.blink, "5"),
            (self.inverse, "7"),
            (self.hidden, "8"),
            (self.strikethrough, "9"),
        ];
        params.extend(
            flags
                .iter()
                .filter(|(on, _)| *on)
                .map(|(_, code)| code.to_string()),
        );
        if let Some(fg) = self.fg {
            params.push(format!("38;5;{fg}"));
        }
        if let Some(bg) = self.bg {
            params.push(format!("48;5;{bg}"));
        }
        format!("\x1b[{}m", params.join(";"))
    }
}

/// A run of text sharing one style. Never mutated after it is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(flatten)]
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

/// One captured line as an ordered sequence of spans.
///
/// The concatenated span text equals the source line with SGR sequences
/// removed. An empty source line has no spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Visible text of the line.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Re-encode the line for display on an ANSI terminal, ending in the
    /// default style
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        let mut styled = false;
        for span in &self.spans {
            if span.style.is_plain() {
                if styled {
                    out.push_str(RESET);
                    styled = false;
                }
            } else {
                out.push_str(&span.style.to_sgr());
                styled = true;
            }
            out.push_str(&span.text);
        }
        if styled {
            out.push_str(RESET);
        }
        out
    }
}

impl From<Vec<Span>> for Line {
    fn from(spans: Vec<Span>) -> Self {
        Self::new(spans)
    }
}
