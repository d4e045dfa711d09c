//! Session hierarchy refresh into a [`SessionStore`]
//!
//! A full refresh lists sessions, then each session's windows, then the panes
//! of every window of a session concurrently (bounded). Results replace the
//! scope's hierarchy wholesale; a failure records the error and leaves the
//! last-known-good hierarchy in place.

use crate::store::SessionStore;
use muxpod_tmux::{
    CommandExecutor, PaneTarget, TmuxClient, TmuxError, TmuxPane, TmuxSession, TmuxWindow,
    WindowTarget,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fetches the tmux hierarchy of one connection (`scope`)
pub struct TmuxNavigator<E> {
    client: TmuxClient<E>,
    store: Arc<SessionStore>,
    scope: String,
    listing_concurrency: usize,
}

impl<E: CommandExecutor> TmuxNavigator<E> {
    pub fn new(
        client: TmuxClient<E>,
        store: Arc<SessionStore>,
        scope: impl Into<String>,
        listing_concurrency: usize,
    ) -> Self {
        Self {
            client,
            store,
            scope: scope.into(),
            listing_concurrency: listing_concurrency.max(1),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn client(&self) -> &TmuxClient<E> {
        &self.client
    }

    /// Refetch every session with its windows and panes
    ///
    /// Auto-selects the first pane when nothing is selected yet.
    pub async fn refresh_sessions(&self) -> Result<Vec<TmuxSession>, TmuxError> {
        self.tracked(async {
            let sessions = self.fetch_tree().await?;
            log::debug!(
                "Fetched {} session(s) for scope {}",
                sessions.len(),
                self.scope
            );
            self.store.set_sessions(&self.scope, sessions.clone());
            self.store.auto_select(&self.scope);
            Ok(sessions)
        })
        .await
    }

    /// Refetch one session's windows (and their panes)
    pub async fn refresh_windows(&self, session: &str) -> Result<Vec<TmuxWindow>, TmuxError> {
        self.tracked(async {
            let mut windows = self.client.list_windows(session).await?;
            self.fill_panes(session, &mut windows).await?;
            if !self
                .store
                .set_windows(&self.scope, session, windows.clone())
            {
                log::debug!("Session {} not in scope {}; windows not stored", session, self.scope);
            }
            Ok(windows)
        })
        .await
    }

    /// Refetch one window's panes
    pub async fn refresh_panes(
        &self,
        session: &str,
        window_index: u32,
    ) -> Result<Vec<TmuxPane>, TmuxError> {
        self.tracked(async {
            let panes = self
                .client
                .list_panes(&WindowTarget::new(session, window_index))
                .await?;
            if !self
                .store
                .set_panes(&self.scope, session, window_index, panes.clone())
            {
                log::debug!(
                    "Window {}:{} not in scope {}; panes not stored",
                    session,
                    window_index,
                    self.scope
                );
            }
            Ok(panes)
        })
        .await
    }

    /// Make `window` the active window on the server, then select it locally
    pub async fn select_window_remote(&self, window: &WindowTarget) -> Result<(), TmuxError> {
        self.client.select_window(window).await?;
        if self.store.selection().session() != Some(window.session.as_str()) {
            self.store.select_session(&window.session);
        }
        self.store.select_window(window.window_index);
        Ok(())
    }

    /// Make `target` the active pane on the server, then select it locally
    pub async fn select_pane_remote(&self, target: &PaneTarget) -> Result<(), TmuxError> {
        self.client.select_pane(target).await?;
        let selection = self.store.selection();
        if selection.session() != Some(target.session.as_str()) {
            self.store.select_session(&target.session);
        }
        if selection.window() != Some(target.window_index) {
            self.store.select_window(target.window_index);
        }
        self.store.select_pane(target.pane_index);
        Ok(())
    }

    /// Run `work` with the store's loading/error status maintained around it
    async fn tracked<T>(
        &self,
        work: impl Future<Output = Result<T, TmuxError>>,
    ) -> Result<T, TmuxError> {
        self.store.set_loading(true);
        self.store.set_error(None);
        let result = work.await;
        if let Err(e) = &result {
            log::warn!("tmux refresh for scope {} failed: {}", self.scope, e);
            self.store.set_error(Some(e.to_string()));
        }
        self.store.set_loading(false);
        result
    }

    async fn fetch_tree(&self) -> Result<Vec<TmuxSession>, TmuxError> {
        let mut sessions = self.client.list_sessions().await?;
        for session in sessions.iter_mut() {
            let mut windows = self.client.list_windows(&session.name).await?;
            self.fill_panes(&session.name, &mut windows).await?;
            session.windows = windows;
        }
        Ok(sessions)
    }

    /// List panes of all `windows` concurrently, results kept in window order
    ///
    /// The first failure aborts the remaining listings.
    async fn fill_panes(&self, session: &str, windows: &mut [TmuxWindow]) -> Result<(), TmuxError> {
        let semaphore = Arc::new(Semaphore::new(self.listing_concurrency));
        let mut join_set = JoinSet::new();

        for (pos, window) in windows.iter().enumerate() {
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let target = WindowTarget::new(session, window.index);
            join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (
                        pos,
                        Err(TmuxError::Transport("listing semaphore closed".to_string())),
                    );
                };
                (pos, client.list_panes(&target).await)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            let (pos, panes) = joined
                .map_err(|e| TmuxError::Transport(format!("pane listing task failed: {e}")))?;
            windows[pos].panes = panes?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muxpod_tmux::ExecError;
    use muxpod_tmux::testing::ScriptedExecutor;

    fn navigator() -> (Arc<ScriptedExecutor>, TmuxNavigator<ScriptedExecutor>) {
        let exec = Arc::new(ScriptedExecutor::new());
        let nav = TmuxNavigator::new(
            TmuxClient::new(Arc::clone(&exec)),
            Arc::new(SessionStore::new()),
            "local",
            2,
        );
        (exec, nav)
    }

    fn script_tree(exec: &ScriptedExecutor) {
        exec.push("list-sessions", Ok("main\t1700000000\t1\t2\n".into()));
        exec.push("list-windows", Ok("0\tedit\t1\t2\n3\tlogs\t0\t1\n".into()));
        exec.push(
            "list-panes -t \"main:0\"",
            Ok("0\t%1\t1\tnvim\tedit\t120\t40\t4\t2\n1\t%2\t0\tzsh\tsh\t80\t40\t0\t0\n".into()),
        );
        exec.push(
            "list-panes -t \"main:3\"",
            Ok("0\t%7\t1\ttail\tlogs\t200\t50\t0\t49\n".into()),
        );
    }

    #[tokio::test]
    async fn test_refresh_builds_tree_and_auto_selects() {
        let (exec, nav) = navigator();
        script_tree(&exec);

        let sessions = nav.refresh_sessions().await.unwrap();
        assert_eq!(sessions.len(), 1);
        let windows = &sessions[0].windows;
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].panes.len(), 2);
        assert_eq!(windows[1].panes[0].id, "%7");

        let store = nav.store();
        assert_eq!(store.sessions("local"), sessions);
        assert_eq!(store.selected_target(), Some(PaneTarget::new("main", 0, 0)));
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_last_known_good() {
        let (exec, nav) = navigator();
        script_tree(&exec);
        nav.refresh_sessions().await.unwrap();

        exec.push("list-sessions", Err(ExecError::Transport("connection reset".into())));
        let err = nav.refresh_sessions().await.unwrap_err();
        assert!(err.is_transport());

        let snap = nav.store().snapshot("local");
        assert_eq!(snap.sessions.len(), 1);
        assert_eq!(snap.error.as_deref(), Some("transport error: connection reset"));
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn test_no_server_clears_scope() {
        let (exec, nav) = navigator();
        exec.push(
            "list-sessions",
            Err(ExecError::command("no server running on /tmp/tmux-501/default")),
        );
        assert!(nav.refresh_sessions().await.unwrap().is_empty());
        assert!(nav.store().sessions("local").is_empty());
        assert!(nav.store().selected_target().is_none());
    }

    #[tokio::test]
    async fn test_refresh_panes_replaces_subtree() {
        let (exec, nav) = navigator();
        script_tree(&exec);
        nav.refresh_sessions().await.unwrap();

        exec.push("list-panes", Ok("0\t%9\t1\tbash\tb\t80\t24\t0\t0\n".into()));
        let panes = nav.refresh_panes("main", 3).await.unwrap();
        assert_eq!(panes[0].id, "%9");
        assert_eq!(nav.store().sessions("local")[0].windows[1].panes[0].id, "%9");
    }

    #[tokio::test]
    async fn test_remote_select_updates_selection() {
        let (exec, nav) = navigator();
        exec.on("select-", Ok(String::new()));

        nav.select_pane_remote(&PaneTarget::new("work", 2, 1))
            .await
            .unwrap();
        assert_eq!(nav.store().selected_target(), Some(PaneTarget::new("work", 2, 1)));

        nav.select_window_remote(&WindowTarget::new("work", 4))
            .await
            .unwrap();
        let selection = nav.store().selection();
        assert_eq!(selection.window(), Some(4));
        assert_eq!(selection.pane(), None);
        assert_eq!(
            exec.calls(),
            vec![
                "tmux select-pane -t \"work:2.1\"",
                "tmux select-window -t \"work:4\"",
            ]
        );
    }
}
