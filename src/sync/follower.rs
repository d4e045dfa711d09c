//! Keeps exactly one pane synchronized: the selected one

use super::engine::{PaneSync, SyncConfig};
use crate::clock::Clock;
use crate::store::{SessionStore, TerminalStore};
use muxpod_tmux::{CommandExecutor, CursorPosition, PaneTarget, TmuxClient};
use std::sync::Arc;

/// Restarts synchronization whenever the followed pane changes
///
/// Switching panes stops the old engine first, which destroys its mirror,
/// then starts a fresh one for the new target.
pub struct PaneFollower<E> {
    client: TmuxClient<E>,
    store: Arc<TerminalStore>,
    clock: Arc<dyn Clock>,
    config: SyncConfig,
    active: Option<PaneSync<E>>,
}

impl<E: CommandExecutor> PaneFollower<E> {
    pub fn new(
        client: TmuxClient<E>,
        store: Arc<TerminalStore>,
        clock: Arc<dyn Clock>,
        config: SyncConfig,
    ) -> Self {
        Self {
            client,
            store,
            clock,
            config,
            active: None,
        }
    }

    /// Target currently being synchronized
    pub fn current(&self) -> Option<&PaneTarget> {
        self.active.as_ref().map(PaneSync::target)
    }

    /// The running engine, for key forwarding
    pub fn active(&self) -> Option<&PaneSync<E>> {
        self.active.as_ref()
    }

    /// Follow `target`; `None` stops following
    ///
    /// Returns whether the followed pane changed.
    pub async fn follow(&mut self, target: Option<PaneTarget>) -> bool {
        self.follow_with_cursor(target, CursorPosition::default())
            .await
    }

    /// Follow the selection held in `sessions`, seeding the cursor from the
    /// pane listing
    pub async fn follow_selection(&mut self, sessions: &SessionStore, scope: &str) -> bool {
        let cursor = sessions
            .current_pane(scope)
            .map(|p| p.cursor())
            .unwrap_or_default();
        self.follow_with_cursor(sessions.selected_target(), cursor)
            .await
    }

    pub fn stop(&mut self) {
        if let Some(sync) = self.active.take() {
            sync.stop_polling();
        }
    }

    async fn follow_with_cursor(
        &mut self,
        target: Option<PaneTarget>,
        cursor: CursorPosition,
    ) -> bool {
        if self.current() == target.as_ref() {
            return false;
        }
        self.stop();
        let Some(target) = target else {
            return true;
        };

        log::info!("Following pane {}", target);
        let sync = PaneSync::new(
            self.client.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            self.config.clone(),
            target,
        )
        .with_cursor(cursor);
        sync.start_polling().await;
        self.active = Some(sync);
        true
    }
}

impl<E> Drop for PaneFollower<E> {
    fn drop(&mut self) {
        if let Some(sync) = self.active.take() {
            sync.stop_polling();
        }
    }
}
