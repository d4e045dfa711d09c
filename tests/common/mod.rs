//! Shared integration test helpers for muxpod.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` keeps warnings quiet when a file uses only some
//! helpers.

#![allow(dead_code)]

use muxpod::{ManualClock, PaneSync, SyncConfig, TerminalStore};
use muxpod_tmux::testing::ScriptedExecutor;
use muxpod_tmux::{PaneTarget, TmuxClient};
use std::sync::Arc;
use std::time::Duration;

/// Pane mirrored by [`SyncFixture`]
pub const PANE_ID: &str = "work:1.0";

/// A sync engine wired to a scripted executor, a store and a manual clock
pub struct SyncFixture {
    pub exec: Arc<ScriptedExecutor>,
    pub store: Arc<TerminalStore>,
    pub clock: Arc<ManualClock>,
    pub sync: PaneSync<ScriptedExecutor>,
}

impl SyncFixture {
    pub fn new(config: SyncConfig) -> Self {
        let exec = Arc::new(ScriptedExecutor::new());
        let store = Arc::new(TerminalStore::new(config.scrollback_lines));
        let clock = Arc::new(ManualClock::new(10_000));
        let sync = PaneSync::new(
            TmuxClient::new(Arc::clone(&exec)),
            Arc::clone(&store),
            clock.clone(),
            config,
            PaneTarget::new("work", 1, 0),
        );
        Self {
            exec,
            store,
            clock,
            sync,
        }
    }

    /// Plain text of the mirrored lines, `None` when there is no mirror
    pub fn text(&self) -> Option<Vec<String>> {
        self.store.content(PANE_ID).map(|c| c.plain_lines())
    }

    pub fn captures(&self) -> usize {
        self.exec.count("capture-pane")
    }
}

/// Default engine settings with a 100 ms cadence
pub fn config() -> SyncConfig {
    SyncConfig {
        poll_interval: Duration::from_millis(100),
        ..SyncConfig::default()
    }
}

/// Let virtual time pass (and spawned tasks run)
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// One `list-panes` output row
pub fn pane_row(index: u32, id: &str, command: &str, cursor: (u32, u32)) -> String {
    format!(
        "{index}\t{id}\t{}\t{command}\t{command}\t80\t24\t{}\t{}\n",
        u8::from(index == 0),
        cursor.0,
        cursor.1
    )
}
