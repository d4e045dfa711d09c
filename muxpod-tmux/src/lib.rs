//! tmux remote control over a command-execution channel
//!
//! This crate drives a tmux server that is only reachable through a
//! "run a command, get its stdout" capability (typically an SSH exec
//! channel). There is no persistent stream and no control-mode connection:
//! every operation is one shell line whose tab-delimited output is parsed
//! back into typed records.
//!
//! ## Architecture
//!
//! - `types.rs`: Session / window / pane records and pane targets
//! - `commands.rs`: Command builders producing single shell lines
//! - `parser.rs`: Defensive, per-line parsing of list output
//! - `quote.rs`: All shell quoting for targets and key payloads
//! - `keys.rs`: Symbolic key names and Ctrl/Alt encoding
//! - `executor.rs`: The execution capability consumed by the client
//! - `client.rs`: High-level operations composing the above
//! - `error.rs`: Typed errors surfaced to callers

mod client;
mod commands;
mod error;
mod executor;
pub mod keys;
pub mod parser;
pub mod quote;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
mod types;

pub use client::TmuxClient;
pub use commands::{
    CURSOR_FORMAT, CaptureOptions, FIELD_SEPARATOR, PANE_FORMAT, SESSION_FORMAT, TmuxCommand,
    WINDOW_FORMAT,
};
pub use error::{ExecError, TmuxError};
pub use executor::CommandExecutor;
pub use keys::{KeyInput, SpecialKey};
pub use parser::{LineParse, SkipReason};
pub use types::{CursorPosition, PaneTarget, TmuxPane, TmuxSession, TmuxWindow, WindowTarget};
