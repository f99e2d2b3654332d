// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use boltzpay_tools::prelude::*;` to get started quickly.

pub use crate::bridge::{
    Bridge, BridgeConfig, CommandLine, Invocation, LauncherLocator, ProcessOutcome,
    ProcessRunner, ResultEnvelope, SearchPath, TokioRunner,
};
pub use crate::error::{BridgeError, ConfigError, Error, ToolError};
pub use crate::tool::{Registry, Tool, ToolDefinition, ToolResult};
pub use crate::tools::{
    BudgetTool, CheckTool, DiscoverTool, ErrorPolicy, FetchTool, HistoryTool, Operation,
    PaidApiTool, QuoteTool, WalletTool, all_tools,
};
