// ABOUTME: CheckTool - checks whether an endpoint is paid and how.
// ABOUTME: Maps url onto `check <url>`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::adapter::parse_params;
use super::{Adapter, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

pub struct CheckTool {
    adapter: Adapter,
}

impl CheckTool {
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
impl Tool for CheckTool {
    fn name(&self) -> &str {
        "boltzpay_check"
    }

    fn description(&self) -> &str {
        "Check whether a URL requires payment (x402 or ACP). Returns protocol type, price, \
         and available chains. No credentials needed."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL to check for payment requirements"
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

impl PaidApiTool for CheckTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, params: serde_json::Value) -> Result<Operation, ToolError> {
        let params: Params = parse_params(params)?;
        Ok(Operation::Check { url: params.url })
    }
}
