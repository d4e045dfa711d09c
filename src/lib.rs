//! muxpod: mirror and drive tmux panes over an exec-only channel
//!
//! The workspace splits into three crates plus this one:
//!
//! - `muxpod-ansi`: SGR escape parser producing styled spans
//! - `muxpod-tmux`: command codec and the remote control client
//! - `muxpod-config`: YAML configuration
//!
//! This crate holds the stateful parts: the stores that presentation code
//! reads, the selection state machine, the per-pane sync engine, the
//! hierarchy navigator, and the process-backed executor used by the CLI.
//!
//! # Lock policy
//!
//! All shared state uses `parking_lot` locks held only for short, synchronous
//! sections. No lock guard is ever held across an `.await`.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod clock;
pub mod content;
pub mod debug;
pub mod navigator;
pub mod selection;
pub mod store;
pub mod sync;
pub mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use content::PaneContent;
pub use navigator::TmuxNavigator;
pub use selection::Selection;
pub use store::{SessionSnapshot, SessionStore, TerminalStore};
pub use sync::{PaneFollower, PaneSync, PollTask, SyncConfig, SyncOutcome};
pub use transport::ProcessExecutor;
