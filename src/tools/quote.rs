// ABOUTME: QuoteTool - prices a paid endpoint without paying.
// ABOUTME: Maps url onto `quote <url>`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::adapter::parse_params;
use super::{Adapter, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

/// Tool for pricing a paid endpoint. Never triggers a payment.
pub struct QuoteTool {
    adapter: Adapter,
}

impl QuoteTool {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self {
            adapter: Adapter::new(bridge, policy),
        }
    }
}

#[derive(Deserialize)]
struct Params {
    url: String,
}

#[async_trait]
impl Tool for QuoteTool {
    fn name(&self) -> &str {
        "boltzpay_quote"
    }

    fn description(&self) -> &str {
        "Get the cost of a paid API endpoint without paying. Returns protocol, amount, \
         currency, and available networks. No credentials needed."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL of the paid endpoint to get a price quote for"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let op = self.operation(params)?;
        self.adapter.call(op).await
    }
}

impl PaidApiTool for QuoteTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, params: serde_json::Value) -> Result<Operation, ToolError> {
        let params: Params = parse_params(params)?;
        Ok(Operation::Quote { url: params.url })
    }
}
