//! SGR escape-sequence parsing for captured pane output.
//!
//! Raw `capture-pane -e` output carries colour and attribute changes as
//! `ESC [ <params> m` sequences. This crate turns each captured line into a
//! sequence of [`Span`]s, each carrying a snapshot of the style that was
//! active when its text was written.
//!
//! ## Architecture
//!
//! - `span.rs`: the published document model (`Style`, `Span`, `Line`)
//! - `sgr.rs`: SGR parameter semantics and truecolor down-sampling
//! - `parser.rs`: line scanning, multi-line parsing, escape stripping
//!
//! Only SGR sequences are interpreted. Other escape sequences pass through as
//! text; this is not a terminal emulator.

mod parser;
mod sgr;
mod span;

pub use parser::{parse_line, parse_lines, strip_escapes};
pub use sgr::{apply_sgr, parse_params, rgb_to_256};
pub use span::{ColorIndex, Line, Span, Style};
