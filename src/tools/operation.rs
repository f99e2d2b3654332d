// ABOUTME: Operation - the seven BoltzPay CLI commands with their typed inputs.
// ABOUTME: args() is the pure, order-preserving mapping from inputs to CLI arguments.

use crate::bridge::Invocation;

/// Default HTTP method for `fetch`.
pub const DEFAULT_METHOD: &str = "GET";

/// A BoltzPay CLI command and its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Fetch a paid endpoint, paying if required.
    Fetch {
        url: String,
        method: String,
        chain: Option<String>,
    },
    /// Check whether an endpoint requires payment.
    Check { url: String },
    /// Price an endpoint without paying.
    Quote { url: String },
    /// Browse the directory of compatible paid APIs.
    Discover { category: Option<String> },
    Budget,
    History,
    Wallet,
}

impl Operation {
    /// `fetch` with the default method and no chain override.
    pub fn fetch(url: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            chain: None,
        }
    }

    /// The CLI subcommand.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Check { .. } => "check",
            Self::Quote { .. } => "quote",
            Self::Discover { .. } => "discover",
            Self::Budget => "budget",
            Self::History => "history",
            Self::Wallet => "wallet",
        }
    }

    /// CLI arguments after the subcommand. Never includes `--json`.
    ///
    /// Empty optional values are treated as absent.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Fetch { url, method, chain } => {
                let mut args = vec![url.clone(), "--method".to_string(), method.clone()];
                if let Some(chain) = chain.as_deref().filter(|c| !c.is_empty()) {
                    args.push("--chain".to_string());
                    args.push(chain.to_string());
                }
                args
            }
            Self::Check { url } | Self::Quote { url } => vec![url.clone()],
            Self::Discover { category } => match category.as_deref().filter(|c| !c.is_empty()) {
                Some(category) => vec!["--category".to_string(), category.to_string()],
                None => Vec::new(),
            },
            Self::Budget | Self::History | Self::Wallet => Vec::new(),
        }
    }

    /// Bridge invocation using the bridge's default timeout.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(self.command(), self.args())
    }
}
