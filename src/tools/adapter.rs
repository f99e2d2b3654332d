// ABOUTME: Adapter - shared call path from a tool to the Bridge, plus the error policy.
// ABOUTME: Raise propagates BridgeError; Stringify turns it into an error ToolResult.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::Operation;
use crate::bridge::{Bridge, ResultEnvelope};
use crate::error::{BridgeError, ToolError};
use crate::tool::{Tool, ToolResult};

/// Prefix shared by every tool name.
pub const TOOL_PREFIX: &str = "boltzpay";

/// How a tool reports bridge failures to its caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Return the [`BridgeError`] through `Err`.
    #[default]
    Raise,
    /// Return `Ok` with an error result reading `Error (<CODE>): <message>`.
    Stringify,
}

/// Runs operations through a bridge and presents the outcome under a policy.
#[derive(Debug, Clone)]
pub struct Adapter {
    bridge: Arc<Bridge>,
    policy: ErrorPolicy,
}

impl Adapter {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self { bridge, policy }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    /// Run an operation without blocking the runtime.
    pub async fn call(&self, op: Operation) -> Result<ToolResult, anyhow::Error> {
        let result = self.bridge.execute(&op.invocation()).await;
        self.present(op.command(), result)
    }

    /// Run an operation, blocking the calling thread.
    pub fn call_blocking(&self, op: Operation) -> Result<ToolResult, anyhow::Error> {
        let result = self.bridge.execute_blocking(&op.invocation());
        self.present(op.command(), result)
    }

    fn present(
        &self,
        command: &str,
        result: Result<ResultEnvelope, BridgeError>,
    ) -> Result<ToolResult, anyhow::Error> {
        match result {
            Ok(envelope) => {
                Ok(ToolResult::text(envelope.to_pretty_string()).with_metadata("command", command))
            }
            Err(e) => match self.policy {
                ErrorPolicy::Raise => Err(e.into()),
                ErrorPolicy::Stringify => Ok(ToolResult::error(describe_error(&e))
                    .with_metadata("command", command)
                    .with_metadata("code", e.code())),
            },
        }
    }
}

/// Descriptive text for a bridge error: `Error (<CODE>): <message>`.
pub fn describe_error(error: &BridgeError) -> String {
    format!("Error ({}): {}", error.code(), error.message())
}

/// A tool backed by one BoltzPay CLI command.
pub trait PaidApiTool: Tool {
    /// The adapter this tool calls through.
    fn adapter(&self) -> &Adapter;

    /// Map validated params to the operation to run.
    fn operation(&self, params: serde_json::Value) -> Result<Operation, ToolError>;

    /// Blocking counterpart of [`Tool::execute`].
    fn execute_blocking(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let op = self.operation(params)?;
        self.adapter().call_blocking(op)
    }
}

/// Deserialize tool params, treating `null` as an empty object.
pub(crate) fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, ToolError> {
    let params = if params.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParams(e.to_string()))
}
