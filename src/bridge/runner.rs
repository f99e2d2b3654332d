// ABOUTME: ProcessRunner - spawns the CLI child, enforces the timeout, captures output.
// ABOUTME: TokioRunner kills and reaps the child when the deadline passes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::error::BridgeError;

/// A fully resolved command line, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub timeout: Duration,
}

/// What a finished child left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    /// Build an outcome from an exit code and captured text.
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Spawns a command line and waits for it.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion or until `line.timeout` expires.
    ///
    /// Implementations must fail with [`BridgeError::Timeout`] on expiry,
    /// after the child is gone, and with [`BridgeError::NodeNotFound`] when
    /// the program vanished between lookup and spawn.
    async fn run(&self, line: &CommandLine) -> Result<ProcessOutcome, BridgeError>;
}

/// Runs commands as tokio child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(&self, line: &CommandLine) -> Result<ProcessOutcome, BridgeError> {
        let mut cmd = Command::new(&line.program);
        cmd.args(&line.args)
            .envs(line.env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so a timeout can take down whatever the launcher started.
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BridgeError::NodeNotFound,
            _ => BridgeError::cli(format!(
                "Failed to run {}: {}",
                line.program.display(),
                e
            )),
        })?;

        let pid = child.id();
        tracing::debug!(?pid, program = %line.program.display(), "spawned CLI process");

        // Drain both pipes concurrently so a chatty child can't block on a full pipe.
        let mut stdout_task = tokio::spawn(drain(child.stdout.take(), "stdout"));
        let mut stderr_task = tokio::spawn(drain(child.stderr.take(), "stderr"));

        // The deadline covers the exit and both drains: a background process
        // holding the pipes open must not outlive it.
        let finished = tokio::time::timeout(line.timeout, async {
            let status = child.wait().await;
            let stdout = (&mut stdout_task).await.unwrap_or_default();
            let stderr = (&mut stderr_task).await.unwrap_or_default();
            (status, stdout, stderr)
        })
        .await;

        let (status, stdout, stderr) = match finished {
            Ok((Ok(status), stdout, stderr)) => (status, stdout, stderr),
            Ok((Err(e), _, _)) => {
                return Err(BridgeError::cli(format!(
                    "Failed to wait for {}: {}",
                    line.program.display(),
                    e
                )));
            }
            Err(_) => {
                tracing::warn!(
                    ?pid,
                    timeout_secs = line.timeout.as_secs_f64(),
                    "CLI process timed out, killing"
                );
                stdout_task.abort();
                stderr_task.abort();
                terminate(&mut child, pid).await;
                return Err(BridgeError::Timeout {
                    timeout: line.timeout,
                });
            }
        };

        tracing::debug!(?pid, exit_code = ?status.code(), "CLI process exited");

        Ok(ProcessOutcome {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

async fn drain<R>(pipe: Option<R>, name: &'static str) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf).await {
            tracing::debug!(pipe = name, error = %e, read = buf.len(), "reading CLI output failed");
        }
    }
    buf
}

/// Kill the child's process group, then the child itself, and reap it.
async fn terminate(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    if let Some(pgid) = pid.and_then(|p| libc::pid_t::try_from(p).ok()) {
        // SAFETY: kill(2) with a negative pid only signals the group we created at spawn.
        let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
        if rc != 0 {
            tracing::debug!(
                ?pid,
                error = %std::io::Error::last_os_error(),
                "killing CLI process group failed"
            );
        }
    }

    // A failure here means the child already exited; wait() still reaps it.
    if let Err(e) = child.start_kill() {
        tracing::debug!(?pid, error = %e, "kill after timeout failed");
    }
    if let Err(e) = child.wait().await {
        tracing::debug!(?pid, error = %e, "reaping CLI process failed");
    }
}
