//! Client behaviour against an executor defined outside the crate

use muxpod_tmux::{
    CaptureOptions, CommandExecutor, ExecError, PaneTarget, TmuxClient, TmuxError, WindowTarget,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Replies by subcommand name, recording each command line
#[derive(Default)]
struct FakeRemote {
    replies: HashMap<&'static str, Result<String, ExecError>>,
    seen: Mutex<Vec<String>>,
}

impl FakeRemote {
    fn with(mut self, subcommand: &'static str, reply: Result<String, ExecError>) -> Self {
        self.replies.insert(subcommand, reply);
        self
    }
}

impl CommandExecutor for FakeRemote {
    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ExecError>> + Send {
        self.seen.lock().unwrap().push(command.to_string());
        let reply = command
            .split_whitespace()
            .nth(1)
            .and_then(|sub| self.replies.get(sub).cloned())
            .unwrap_or_else(|| Err(ExecError::command("unknown command")));
        async move { reply }
    }
}

#[tokio::test]
async fn test_full_hierarchy_listing() {
    let remote = FakeRemote::default()
        .with(
            "list-sessions",
            Ok("web\t1696000000\t1\t2\nbroken\n\t1\t0\t1\nops\t1696000100\t0\t1\n".into()),
        )
        .with("list-windows", Ok("0\tserver\t1\t2\n2\tlogs\t0\t1\n".into()))
        .with(
            "list-panes",
            Ok("0\t%1\t1\tnode\tweb-1\t100\t30\t0\t29\n1\t%2\t0\tzsh\tweb-1\t100\t30\t4\t2\n".into()),
        );
    let client = TmuxClient::new(Arc::new(remote));

    let sessions = client.list_sessions().await.unwrap();
    assert_eq!(
        sessions.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["web", "ops"]
    );

    let windows = client.list_windows("web").await.unwrap();
    assert_eq!(windows.iter().map(|w| w.index).collect::<Vec<_>>(), vec![0, 2]);

    let panes = client.list_panes(&WindowTarget::new("web", 0)).await.unwrap();
    assert_eq!(panes.len(), 2);
    assert_eq!(panes[1].id, "%2");
    assert_eq!(panes[1].cursor().x, 4);

    let seen = client.executor().seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 3);
    assert!(seen[1].starts_with("tmux list-windows -t \"web\" -F "));
    assert!(seen[2].starts_with("tmux list-panes -t \"web:0\" -F "));
}

#[tokio::test]
async fn test_error_taxonomy() {
    let remote = FakeRemote::default()
        .with(
            "list-sessions",
            Err(ExecError::command("zsh:1: command not found: tmux")),
        )
        .with(
            "capture-pane",
            Err(ExecError::Command {
                message: "can't find pane: 9".into(),
                exit_code: Some(1),
            }),
        )
        .with("send-keys", Err(ExecError::Transport("channel closed".into())));
    let client = TmuxClient::new(Arc::new(remote));
    let target = PaneTarget::new("web", 0, 9);

    assert_eq!(client.list_sessions().await, Err(TmuxError::NotInstalled));
    assert_eq!(
        client
            .capture_pane(&target, &CaptureOptions::default())
            .await,
        Err(TmuxError::CommandFailed("can't find pane: 9".into()))
    );
    assert_eq!(
        client.send_literal(&target, "ls").await,
        Err(TmuxError::Transport("channel closed".into()))
    );
}

#[tokio::test]
async fn test_empty_rows_are_not_errors() {
    let remote = FakeRemote::default()
        .with("list-sessions", Ok(String::new()))
        .with("capture-pane", Ok("\n".into()));
    let client = TmuxClient::new(Arc::new(remote));

    assert!(client.list_sessions().await.unwrap().is_empty());
    let capture = CaptureOptions {
        start: Some(-1000),
        end: None,
        escapes: true,
    };
    let lines = client
        .capture_pane(&PaneTarget::new("web", 0, 0), &capture)
        .await
        .unwrap();
    assert!(lines.is_empty());
}
