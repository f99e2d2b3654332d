// ABOUTME: DiscoverTool - browses the directory of BoltzPay-compatible paid APIs.
// ABOUTME: Maps an optional category onto `discover [--category <c>]`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::adapter::parse_params;
use super::{Adapter, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

/// Tool for listing paid API endpoints with live status.
pub struct DiscoverTool {
    adapter: Adapter,
}

impl DiscoverTool {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self {
            adapter: Adapter::new(bridge, policy),
        }
    }
}

#[derive(Deserialize)]
struct Params {
    #[serde(default)]
    category: Option<String>,
}

#[async_trait]
impl Tool for DiscoverTool {
    fn name(&self) -> &str {
        "boltzpay_discover"
    }

    fn description(&self) -> &str {
        "Browse compatible paid API endpoints with live status, pricing and protocol info. \
         Filter by category. No credentials needed."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Filter by category (e.g. 'crypto-data', 'utilities', 'demo')"
                }
            }
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let op = self.operation(params)?;
        self.adapter.call(op).await
    }
}

impl PaidApiTool for DiscoverTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, params: serde_json::Value) -> Result<Operation, ToolError> {
        let params: Params = parse_params(params)?;
        Ok(Operation::Discover {
            category: params.category,
        })
    }
}
