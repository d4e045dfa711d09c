//! Explicitly owned state containers
//!
//! Both stores are shared as `Arc<_>` and injected into the sync engine and
//! navigator; their methods are the only mutation surface.

mod session;
mod terminal;

pub use session::{SessionSnapshot, SessionStore};
pub use terminal::TerminalStore;
