// ABOUTME: HistoryTool - lists payments made so far.
// ABOUTME: Takes no parameters; runs `history`.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Adapter, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

pub struct HistoryTool {
    adapter: Adapter,
}

impl HistoryTool {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self {
            adapter: Adapter::new(bridge, policy),
        }
    }
}

#[async_trait]
impl Tool for HistoryTool {
    fn name(&self) -> &str {
        "boltzpay_history"
    }

    fn description(&self) -> &str {
        "Show payment history including URLs, amounts, protocols, \
         and transaction hashes. No credentials needed."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let op = self.operation(params)?;
        self.adapter.call(op).await
    }
}

impl PaidApiTool for HistoryTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, _params: serde_json::Value) -> Result<Operation, ToolError> {
        Ok(Operation::History)
    }
}
