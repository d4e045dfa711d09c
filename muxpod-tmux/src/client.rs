//! High-level tmux operations over a [`CommandExecutor`]
//!
//! One call per logical operation; nothing is cached and nothing is retried.
//! Callers decide what to keep and when to ask again.

use crate::commands::{CaptureOptions, TmuxCommand};
use crate::error::{ExecError, TmuxError, classify, is_no_server};
use crate::executor::CommandExecutor;
use crate::keys::{KeyInput, SpecialKey};
use crate::parser;
use crate::types::{CursorPosition, PaneTarget, TmuxPane, TmuxSession, TmuxWindow, WindowTarget};
use std::sync::Arc;

const DEFAULT_TMUX_PATH: &str = "tmux";

/// tmux client bound to one execution channel
///
/// Cloning shares the executor, so listings can be fanned out across tasks.
pub struct TmuxClient<E> {
    executor: Arc<E>,
    tmux_path: String,
}

impl<E> Clone for TmuxClient<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            tmux_path: self.tmux_path.clone(),
        }
    }
}

impl<E: CommandExecutor> TmuxClient<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            tmux_path: DEFAULT_TMUX_PATH.to_string(),
        }
    }

    /// Use a non-default tmux binary (e.g. `/opt/homebrew/bin/tmux`)
    pub fn with_tmux_path(mut self, tmux_path: impl Into<String>) -> Self {
        self.tmux_path = tmux_path.into();
        self
    }

    pub fn tmux_path(&self) -> &str {
        &self.tmux_path
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    /// Run a command and return raw stdout
    ///
    /// A listing command against a server that is not running yields empty
    /// output rather than an error.
    pub async fn run(&self, command: &TmuxCommand) -> Result<String, TmuxError> {
        let line = command.shell_line(&self.tmux_path);
        log::trace!("tmux exec: {}", line);
        match self.executor.execute(&line).await {
            Ok(output) => Ok(output),
            Err(ExecError::Command { message, .. })
                if command.is_listing() && is_no_server(&message) =>
            {
                log::debug!("No tmux server running; treating listing as empty");
                Ok(String::new())
            }
            Err(err) => {
                let err = classify(err, &self.tmux_path);
                log::debug!("tmux command failed ({}): {}", command.as_str(), err);
                Err(err)
            }
        }
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// All sessions on the server, windows not yet fetched
    pub async fn list_sessions(&self) -> Result<Vec<TmuxSession>, TmuxError> {
        let output = self.run(&TmuxCommand::list_sessions()).await?;
        Ok(parser::parse_sessions(&output))
    }

    /// Windows of one session, panes not yet fetched
    pub async fn list_windows(&self, session: &str) -> Result<Vec<TmuxWindow>, TmuxError> {
        let output = self.run(&TmuxCommand::list_windows(session)).await?;
        Ok(parser::parse_windows(&output))
    }

    pub async fn list_panes(&self, window: &WindowTarget) -> Result<Vec<TmuxPane>, TmuxError> {
        let output = self.run(&TmuxCommand::list_panes(window)).await?;
        Ok(parser::parse_panes(&output))
    }

    // =========================================================================
    // Pane I/O
    // =========================================================================

    /// Capture pane content as raw lines (escapes kept when requested)
    pub async fn capture_pane(
        &self,
        target: &PaneTarget,
        options: &CaptureOptions,
    ) -> Result<Vec<String>, TmuxError> {
        let output = self.run(&TmuxCommand::capture_pane(target, options)).await?;
        Ok(parser::parse_capture(&output))
    }

    pub async fn send_keys(&self, target: &PaneTarget, input: &KeyInput) -> Result<(), TmuxError> {
        self.run(&TmuxCommand::send_keys(target, input)).await?;
        Ok(())
    }

    /// Type `text` verbatim
    pub async fn send_literal(&self, target: &PaneTarget, text: &str) -> Result<(), TmuxError> {
        if text.is_empty() {
            return Ok(());
        }
        self.send_keys(target, &KeyInput::Literal(text.to_string()))
            .await
    }

    pub async fn send_special(&self, target: &PaneTarget, key: SpecialKey) -> Result<(), TmuxError> {
        self.send_keys(target, &KeyInput::Special(key)).await
    }

    /// Send Ctrl+`key` (`C-<key lower-cased>`)
    pub async fn send_ctrl(&self, target: &PaneTarget, key: &str) -> Result<(), TmuxError> {
        self.send_keys(target, &KeyInput::Ctrl(key.to_string()))
            .await
    }

    /// Send Alt+`key` (`M-<key>`)
    pub async fn send_alt(&self, target: &PaneTarget, key: &str) -> Result<(), TmuxError> {
        self.send_keys(target, &KeyInput::Alt(key.to_string()))
            .await
    }

    /// Current cursor position; `Ok(None)` when the reply cannot be parsed
    pub async fn cursor_position(
        &self,
        target: &PaneTarget,
    ) -> Result<Option<CursorPosition>, TmuxError> {
        let output = self.run(&TmuxCommand::cursor_position(target)).await?;
        Ok(parser::parse_cursor(&output))
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub async fn select_window(&self, window: &WindowTarget) -> Result<(), TmuxError> {
        self.run(&TmuxCommand::select_window(window)).await?;
        Ok(())
    }

    pub async fn select_pane(&self, target: &PaneTarget) -> Result<(), TmuxError> {
        self.run(&TmuxCommand::select_pane(target)).await?;
        Ok(())
    }

    pub async fn resize_pane(
        &self,
        target: &PaneTarget,
        width: u32,
        height: u32,
    ) -> Result<(), TmuxError> {
        self.run(&TmuxCommand::resize_pane(target, width, height))
            .await?;
        Ok(())
    }
}
