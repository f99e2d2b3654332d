// ABOUTME: BoltzPay tools - one per CLI command, all sharing a single Bridge.
// ABOUTME: fetch, check, quote, discover, budget, history, wallet.

mod adapter;
mod budget;
mod check;
mod discover;
mod fetch;
mod history;
mod operation;
mod quote;
mod wallet;

use std::sync::Arc;

pub use adapter::{Adapter, ErrorPolicy, PaidApiTool, TOOL_PREFIX, describe_error};
pub use budget::BudgetTool;
pub use check::CheckTool;
pub use discover::DiscoverTool;
pub use fetch::FetchTool;
pub use history::HistoryTool;
pub use operation::{DEFAULT_METHOD, Operation};
pub use quote::QuoteTool;
pub use wallet::WalletTool;

use crate::bridge::Bridge;
use crate::tool::Tool;

/// Build all seven tools over one bridge, reporting errors per `policy`.
pub fn all_tools(bridge: Arc<Bridge>, policy: ErrorPolicy) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(FetchTool::new(bridge.clone(), policy)),
        Arc::new(CheckTool::new(bridge.clone(), policy)),
        Arc::new(QuoteTool::new(bridge.clone(), policy)),
        Arc::new(DiscoverTool::new(bridge.clone(), policy)),
        Arc::new(BudgetTool::new(bridge.clone(), policy)),
        Arc::new(HistoryTool::new(bridge.clone(), policy)),
        Arc::new(WalletTool::new(bridge, policy)),
    ]
}
