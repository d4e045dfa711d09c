//! Process-backed command executor
//!
//! Runs each tmux command line either through the local shell (`sh -c`) or on
//! a remote host via the system `ssh` client (`ssh <args> <command>`). The
//! remote login shell parses the command line, which is why every target and
//! payload is quoted by the codec before it gets here.

use muxpod_tmux::{CommandExecutor, ExecError};
use std::future::Future;
use std::process::Stdio;
use tokio::process::Command;

/// Exit status ssh reserves for its own failures (connection, auth)
const SSH_FAILURE_STATUS: i32 = 255;

/// Executes commands in a child process
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    ssh: Option<Vec<String>>,
}

impl ProcessExecutor {
    /// Run commands on this machine
    pub fn local() -> Self {
        Self::default()
    }

    /// Run commands over ssh; `spec` is split like a shell would
    /// (e.g. `-p 2222 -i ~/.ssh/key user@host`)
    pub fn ssh(spec: &str) -> Result<Self, ExecError> {
        let args = shell_words::split(spec)
            .map_err(|e| ExecError::Transport(format!("invalid ssh arguments: {e}")))?;
        if args.is_empty() {
            return Err(ExecError::Transport("empty ssh destination".to_string()));
        }
        Ok(Self { ssh: Some(args) })
    }

    /// Local unless `ssh` is set and non-blank
    pub fn from_spec(ssh: Option<&str>) -> Result<Self, ExecError> {
        match ssh {
            Some(spec) if !spec.trim().is_empty() => Self::ssh(spec),
            _ => Ok(Self::local()),
        }
    }

    pub fn is_remote(&self) -> bool {
        self.ssh.is_some()
    }

    fn command(&self, line: &str) -> Command {
        let mut cmd = match &self.ssh {
            Some(args) => {
                let mut cmd = Command::new("ssh");
                cmd.args(args).arg(line);
                cmd
            }
            None => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ExecError>> + Send {
        let mut child = self.command(command);
        let remote = self.is_remote();
        async move {
            let output = child.output().await.map_err(|e| {
                let program = if remote { "ssh" } else { "sh" };
                ExecError::Transport(format!("failed to spawn {program}: {e}"))
            })?;

            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            if output.status.success() {
                return Ok(stdout);
            }

            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code();
            if remote && exit_code == Some(SSH_FAILURE_STATUS) {
                return Err(ExecError::Transport(stderr));
            }
            let message = if stderr.is_empty() {
                stdout.trim().to_string()
            } else {
                stderr
            };
            Err(ExecError::Command { message, exit_code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_spec_is_split() {
        let exec = ProcessExecutor::ssh("-p 2222 'user@build box'").unwrap();
        assert_eq!(
            exec.ssh,
            Some(vec![
                "-p".to_string(),
                "2222".to_string(),
                "user@build box".to_string()
            ])
        );
        assert!(exec.is_remote());
    }

    #[test]
    fn test_bad_ssh_spec() {
        assert!(matches!(
            ProcessExecutor::ssh("user@host 'unterminated"),
            Err(ExecError::Transport(_))
        ));
        assert!(ProcessExecutor::ssh("   ").is_err());
        assert!(!ProcessExecutor::from_spec(Some("  ")).unwrap().is_remote());
        assert!(!ProcessExecutor::from_spec(None).unwrap().is_remote());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_local_stdout() {
        let out = ProcessExecutor::local()
            .execute("printf 'a\\tb\\n'")
            .await
            .unwrap();
        assert_eq!(out, "a\tb\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_local_failure_carries_stderr_and_code() {
        let err = ProcessExecutor::local()
            .execute("echo 'no server running on /tmp/x' >&2; exit 1")
            .await
            .unwrap_err();
        match err {
            ExecError::Command { message, exit_code } => {
                assert_eq!(message, "no server running on /tmp/x");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
