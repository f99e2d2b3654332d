// ABOUTME: Bridge - the single entry point for running BoltzPay CLI commands.
// ABOUTME: Locates the launcher, builds argv, runs the child, interprets its output.

use std::sync::Arc;
use std::time::Duration;

use super::{
    BridgeConfig, CommandLine, LauncherLocator, ProcessRunner, ResultEnvelope, SearchPath,
    TokioRunner, interpret,
};
use crate::error::BridgeError;

/// One CLI call: a command, its ordered arguments, and an optional timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Create an invocation that uses the bridge's default timeout.
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: None,
        }
    }

    /// Override the timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Launcher arguments: `-y <package> <command> [...args] --json`.
    pub fn launcher_args(&self, package: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 4);
        argv.push("-y".to_string());
        argv.push(package.to_string());
        argv.push(self.command.clone());
        argv.extend(self.args.iter().cloned());
        argv.push("--json".to_string());
        argv
    }
}

/// Runs BoltzPay CLI commands as subprocesses.
///
/// Holds no per-call state; share it behind an `Arc` and call it
/// concurrently. Every call spawns at most one child.
#[derive(Clone)]
pub struct Bridge {
    config: BridgeConfig,
    locator: Arc<dyn LauncherLocator>,
    runner: Arc<dyn ProcessRunner>,
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Bridge {
    /// Create a bridge that searches `PATH` and spawns tokio processes.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            locator: Arc::new(SearchPath::new()),
            runner: Arc::new(TokioRunner),
        }
    }

    /// Create a bridge configured from `BOLTZPAY_*` environment variables.
    pub fn from_env() -> Result<Self, crate::error::ConfigError> {
        Ok(Self::new(BridgeConfig::from_env()?))
    }

    /// Replace the launcher locator.
    pub fn with_locator(mut self, locator: impl LauncherLocator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    /// Replace the process runner.
    pub fn with_runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run `command` with `args` using the default timeout.
    pub async fn run<I, S>(&self, command: &str, args: I) -> Result<ResultEnvelope, BridgeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute(&Invocation::new(command, args)).await
    }

    /// Execute an invocation, waiting for the child without blocking the runtime.
    pub async fn execute(&self, invocation: &Invocation) -> Result<ResultEnvelope, BridgeError> {
        let program = self
            .locator
            .locate(&self.config.launcher)
            .ok_or(BridgeError::NodeNotFound)?;

        let line = CommandLine {
            program,
            args: invocation.launcher_args(&self.config.package),
            env: self.config.env.clone(),
            timeout: invocation.timeout.unwrap_or(self.config.timeout),
        };

        tracing::debug!(
            command = %invocation.command,
            args = ?invocation.args,
            timeout_secs = line.timeout.as_secs_f64(),
            "running BoltzPay CLI"
        );

        let outcome = self.runner.run(&line).await?;
        let result = interpret(&outcome);

        if let Err(e) = &result {
            tracing::debug!(command = %invocation.command, code = e.code(), "CLI call failed");
        }
        result
    }

    /// Execute an invocation, blocking the calling thread until it finishes.
    ///
    /// Drives the async path on a private current-thread runtime. Inside an
    /// existing runtime the work moves to a scoped thread so the caller's
    /// runtime is never nested.
    pub fn execute_blocking(&self, invocation: &Invocation) -> Result<ResultEnvelope, BridgeError> {
        let run = || -> Result<ResultEnvelope, BridgeError> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| BridgeError::cli(format!("Failed to start async runtime: {e}")))?;
            runtime.block_on(self.execute(invocation))
        };

        if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::scope(|s| {
                s.spawn(run)
                    .join()
                    .unwrap_or_else(|_| Err(BridgeError::cli("Bridge worker thread panicked")))
            })
        } else {
            run()
        }
    }

    /// Blocking counterpart of [`Bridge::run`].
    pub fn run_blocking<I, S>(&self, command: &str, args: I) -> Result<ResultEnvelope, BridgeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.execute_blocking(&Invocation::new(command, args))
    }
}
