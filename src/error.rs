// ABOUTME: Defines all error types for boltzpay-tools using thiserror.
// ABOUTME: BridgeError carries the stable code taxonomy callers branch on.

use std::time::Duration;

/// Message shown when the launcher cannot be found.
pub const NODE_NOT_FOUND_MESSAGE: &str = "Node.js/npx not found. Install Node.js 20+ from \
     https://nodejs.org or use the MCP server: npx @boltzpay/mcp";

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Failure of a single CLI bridge call.
///
/// Every variant maps to a stable string code via [`BridgeError::code`].
/// Codes reported by the CLI's own error envelope are forwarded verbatim
/// through [`BridgeError::Cli`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("NODE_NOT_FOUND: {}", NODE_NOT_FOUND_MESSAGE)]
    NodeNotFound,

    #[error("TIMEOUT: BoltzPay CLI command timed out after {} seconds", .timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    #[error("{code}: {message}")]
    Cli { code: String, message: String },

    #[error("PARSE_ERROR: {message}")]
    Parse { message: String },
}

impl BridgeError {
    pub const NODE_NOT_FOUND: &'static str = "NODE_NOT_FOUND";
    pub const TIMEOUT: &'static str = "TIMEOUT";
    pub const CLI_ERROR: &'static str = "CLI_ERROR";
    pub const PARSE_ERROR: &'static str = "PARSE_ERROR";

    /// Create a `CLI_ERROR` with the given message.
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            code: Self::CLI_ERROR.to_string(),
            message: message.into(),
        }
    }

    /// The stable error code.
    pub fn code(&self) -> &str {
        match self {
            Self::NodeNotFound => Self::NODE_NOT_FOUND,
            Self::Timeout { .. } => Self::TIMEOUT,
            Self::Cli { code, .. } => code,
            Self::Parse { .. } => Self::PARSE_ERROR,
        }
    }

    /// The human-readable message, without the code prefix.
    pub fn message(&self) -> String {
        match self {
            Self::NodeNotFound => NODE_NOT_FOUND_MESSAGE.to_string(),
            Self::Timeout { timeout } => format!(
                "BoltzPay CLI command timed out after {} seconds",
                timeout.as_secs_f64()
            ),
            Self::Cli { message, .. } | Self::Parse { message } => message.clone(),
        }
    }
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Errors from loading bridge configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },
}
