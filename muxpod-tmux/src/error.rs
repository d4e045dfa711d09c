//! Error types for tmux operations

use thiserror::Error;

/// Failure reported by a [`crate::CommandExecutor`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecError {
    /// The channel itself failed (connection lost, spawn failure)
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote command ran and failed
    #[error("command failed: {message}")]
    Command {
        message: String,
        exit_code: Option<i32>,
    },
}

impl ExecError {
    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
            exit_code: None,
        }
    }

    /// Raw error text, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(message) | Self::Command { message, .. } => message,
        }
    }
}

/// Errors surfaced by [`crate::TmuxClient`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TmuxError {
    /// The remote host has no tmux binary on its PATH
    #[error("tmux is not installed on the remote host")]
    NotInstalled,

    /// tmux ran and reported an error
    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    /// The execution channel failed; pending operations cannot succeed until
    /// the caller reconnects
    #[error("transport error: {0}")]
    Transport(String),
}

impl TmuxError {
    /// Whether the error means the connection is gone
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Output of a failed command that should be read as "nothing to list"
pub(crate) fn is_no_server(message: &str) -> bool {
    message.contains("no server running") || message.contains("error connecting to")
}

/// Output of a failed command meaning the tmux binary is missing
pub(crate) fn is_not_installed(message: &str, tmux_path: &str) -> bool {
    let binary = tmux_path.rsplit('/').next().unwrap_or(tmux_path);
    message.contains("command not found")
        || message.contains(&format!("{binary}: not found"))
        || message.contains(&format!("{binary}: No such file or directory"))
}

/// Map an executor failure onto the client's error taxonomy
pub(crate) fn classify(error: ExecError, tmux_path: &str) -> TmuxError {
    match error {
        ExecError::Transport(message) => TmuxError::Transport(message),
        ExecError::Command { message, .. } => {
            if is_not_installed(&message, tmux_path) {
                TmuxError::NotInstalled
            } else {
                TmuxError::CommandFailed(message.trim().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_installed_detection() {
        assert_eq!(
            classify(ExecError::command("sh: tmux: command not found"), "tmux"),
            TmuxError::NotInstalled
        );
        assert_eq!(
            classify(ExecError::command("sh: 1: tmux: not found"), "tmux"),
            TmuxError::NotInstalled
        );
        assert_eq!(
            classify(
                ExecError::command("sh: /opt/bin/tmux: No such file or directory"),
                "/opt/bin/tmux"
            ),
            TmuxError::NotInstalled
        );
    }

    #[test]
    fn test_command_failure_keeps_text() {
        assert_eq!(
            classify(ExecError::command("can't find session: nope\n"), "tmux"),
            TmuxError::CommandFailed("can't find session: nope".into())
        );
    }

    #[test]
    fn test_transport_passes_through() {
        let err = classify(ExecError::Transport("connection reset".into()), "tmux");
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "transport error: connection reset");
    }

    #[test]
    fn test_no_server_detection() {
        assert!(is_no_server("no server running on /tmp/tmux-1000/default"));
        assert!(is_no_server("error connecting to /tmp/tmux-0/default (No such file or directory)"));
        assert!(!is_no_server("can't find window: 3"));
    }

    #[test]
    fn test_exec_error_display() {
        let err = ExecError::Command {
            message: "boom".into(),
            exit_code: Some(1),
        };
        assert_eq!(err.to_string(), "command failed: boom");
        assert_eq!(err.message(), "boom");
    }
}
