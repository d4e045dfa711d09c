//! Scripted executor for tests
//!
//! Replies are keyed by a substring of the issued command line. A route can
//! hold queued one-shot replies, a sticky reply used once the queue is empty,
//! and deferred replies that resolve only when the test sends through the
//! returned channel, which lets tests reorder round-trips at will.

use crate::error::ExecError;
use crate::executor::CommandExecutor;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::oneshot;

type Reply = Result<String, ExecError>;

enum Pending {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

struct Route {
    needle: String,
    queued: VecDeque<Pending>,
    sticky: Option<Reply>,
}

#[derive(Default)]
struct Script {
    routes: Vec<Route>,
    calls: Vec<String>,
}

impl Script {
    fn route(&mut self, needle: &str) -> &mut Route {
        let pos = match self.routes.iter().position(|r| r.needle == needle) {
            Some(pos) => pos,
            None => {
                self.routes.push(Route {
                    needle: needle.to_string(),
                    queued: VecDeque::new(),
                    sticky: None,
                });
                self.routes.len() - 1
            }
        };
        &mut self.routes[pos]
    }

    fn take(&mut self, command: &str) -> Pending {
        self.calls.push(command.to_string());
        for route in self.routes.iter_mut() {
            if !command.contains(route.needle.as_str()) {
                continue;
            }
            if let Some(pending) = route.queued.pop_front() {
                return pending;
            }
            if let Some(sticky) = &route.sticky {
                return Pending::Ready(sticky.clone());
            }
        }
        Pending::Ready(Err(ExecError::command(format!(
            "no scripted reply for: {command}"
        ))))
    }
}

/// A [`CommandExecutor`] that replays scripted replies and records calls
#[derive(Default)]
pub struct ScriptedExecutor {
    script: Mutex<Script>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next command containing `needle`
    pub fn push(&self, needle: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .route(needle)
            .queued
            .push_back(Pending::Ready(reply));
        self
    }

    /// Reply to every command containing `needle` once its queue is drained
    pub fn on(&self, needle: &str, reply: Reply) -> &Self {
        self.script.lock().route(needle).sticky = Some(reply);
        self
    }

    /// Queue a reply that is held until the returned sender fires
    ///
    /// Dropping the sender resolves the call with a transport error.
    pub fn defer(&self, needle: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script
            .lock()
            .route(needle)
            .queued
            .push_back(Pending::Deferred(rx));
        tx
    }

    /// Every command line issued so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.script.lock().calls.clone()
    }

    /// Number of issued commands containing `needle`
    pub fn count(&self, needle: &str) -> usize {
        self.script
            .lock()
            .calls
            .iter()
            .filter(|c| c.contains(needle))
            .count()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ExecError>> + Send {
        let pending = self.script.lock().take(command);
        async move {
            match pending {
                Pending::Ready(reply) => reply,
                Pending::Deferred(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ExecError::Transport("deferred reply dropped".into()))),
            }
        }
    }
}
