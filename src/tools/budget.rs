// ABOUTME: BudgetTool - reports the remaining spending budget.
// ABOUTME: Takes no parameters; runs `budget`.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Adapter, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

/// Tool for reading spending limits and what is left of them.
pub struct BudgetTool {
    adapter: Adapter,
}

impl BudgetTool {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self {
            adapter: Adapter::new(bridge, policy),
        }
    }
}

#[async_trait]
impl Tool for BudgetTool {
    fn name(&self) -> &str {
        "boltzpay_budget"
    }

    fn description(&self) -> &str {
        "Show remaining spending budget including daily/monthly limits \
         and per-transaction caps. No credentials needed."
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

impl PaidApiTool for BudgetTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, _params: serde_json::Value) -> Result<Operation, ToolError> {
        Ok(Operation::Budget)
    }
}
