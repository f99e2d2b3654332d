// ABOUTME: FetchTool - fetches a paid API endpoint, paying via the BoltzPay CLI.
// ABOUTME: Maps url/method/chain onto `fetch <url> --method <m> [--chain <c>]`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::adapter::parse_params;
use super::{Adapter, DEFAULT_METHOD, ErrorPolicy, Operation, PaidApiTool};
use crate::bridge::Bridge;
use crate::error::ToolError;
use crate::tool::{Tool, ToolResult};

/// Tool for fetching data from a paid API endpoint.
///
/// The CLI detects x402 or ACP and pays in USDC on Base or Solana. Payment
/// needs `COINBASE_API_KEY_ID`, `COINBASE_API_KEY_SECRET` and
/// `COINBASE_WALLET_SECRET` in the environment; without them the CLI
/// answers `AUTH_MISSING`.
pub struct FetchTool {
    adapter: Adapter,
}

impl FetchTool {
    pub fn new(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Self {
        Self {
            adapter: Adapter::new(bridge, policy),
        }
    }
}

#[derive(Deserialize)]
struct Params {
    url: String,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    chain: Option<String>,
}

#[async_trait]
impl Tool for FetchTool {
    fn name(&self) -> &str {
        "boltzpay_fetch"
    }

    fn description(&self) -> &str {
        "Fetch data from a paid API endpoint. Automatically detects x402 and ACP payment \
         protocols and pays with USDC on Base or Solana. Requires Coinbase CDP credentials \
         (COINBASE_API_KEY_ID, COINBASE_API_KEY_SECRET, COINBASE_WALLET_SECRET)."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL of the paid API endpoint to fetch"
                },
                "method": {
                    "type": "string",
                    "description": "HTTP method (GET, POST, etc.)",
                    "default": DEFAULT_METHOD
                },
                "chain": {
                    "type": "string",
                    "description": "Override chain selection: 'evm' (Base) or 'svm' (Solana)"
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

impl PaidApiTool for FetchTool {
    fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    fn operation(&self, params: serde_json::Value) -> Result<Operation, ToolError> {
        let params: Params = parse_params(params)?;
        let method = params
            .method
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string());
        Ok(Operation::Fetch {
            url: params.url,
            method,
            chain: params.chain,
        })
    }
}
