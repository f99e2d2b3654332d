// ABOUTME: WalletTool - shows wallet addresses and configuration.
// ABOUTME: Takes no parameters; runs `wallet`.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Adapter, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

/// Tool for inspecting wallet addresses, balances and configuration.
pub struct WalletTool {
    adapter: Adapter,
}

impl WalletTool {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self {
            adapter: Adapter::new(bridge, policy),
        }
    }
}

#[async_trait]
impl Tool for WalletTool {
    fn name(&self) -> &str {
        "boltzpay_wallet"
    }

    fn description(&self) -> &str {
        "Show wallet addresses, balances, supported protocols, and budget \
         configuration. No credentials needed for read-only info."
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

impl PaidApiTool for WalletTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, _params: serde_json::Value) -> Result<Operation, ToolError> {
        Ok(Operation::Wallet)
    }
}
