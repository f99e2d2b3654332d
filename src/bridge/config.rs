// ABOUTME: BridgeConfig - launcher, package and timeout settings for CLI calls.
// ABOUTME: Built from defaults, builder setters, or BOLTZPAY_* environment variables.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Default launcher resolved on `PATH`.
pub const DEFAULT_LAUNCHER: &str = "npx";

/// Default package identifier passed to the launcher.
pub const DEFAULT_PACKAGE: &str = "@boltzpay/cli";

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the CLI bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Launcher name (searched on `PATH`) or path.
    pub launcher: String,

    /// Package identifier handed to the launcher after `-y`.
    pub package: String,

    /// Default timeout for calls that don't override it.
    pub timeout: Duration,

    /// Extra environment variables for the child, on top of the inherited ones.
    pub env: HashMap<String, String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            env: HashMap::new(),
        }
    }
}

impl BridgeConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `BOLTZPAY_LAUNCHER`, `BOLTZPAY_PACKAGE` and
    /// `BOLTZPAY_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(launcher) = lookup("BOLTZPAY_LAUNCHER").filter(|v| !v.trim().is_empty()) {
            config.launcher = launcher.trim().to_string();
        }
        if let Some(package) = lookup("BOLTZPAY_PACKAGE").filter(|v| !v.trim().is_empty()) {
            config.package = package.trim().to_string();
        }
        if let Some(raw) = lookup("BOLTZPAY_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "BOLTZPAY_TIMEOUT_SECS".into(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "BOLTZPAY_TIMEOUT_SECS".into(),
                    value: raw,
                    reason: "must be greater than zero".into(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the launcher.
    pub fn launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    /// Set the package identifier.
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Set the default timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}
