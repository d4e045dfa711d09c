//! The command-execution capability the client is built on

use crate::error::ExecError;
use std::future::Future;

/// Runs one shell line on the remote host and returns its stdout
///
/// Implementations provide no streaming, no partial results and no
/// cancellation: once `execute` is awaited the command runs to completion.
pub trait CommandExecutor: Send + Sync + 'static {
    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ExecError>> + Send;
}

