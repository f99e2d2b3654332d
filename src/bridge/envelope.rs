// ABOUTME: ResultEnvelope - the CLI's JSON wire contract, kept verbatim.
// ABOUTME: interpret() turns a ProcessOutcome into an envelope or a BridgeError.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProcessOutcome;
use crate::error::BridgeError;

const UNKNOWN_CODE: &str = "UNKNOWN";
const UNKNOWN_MESSAGE: &str = "Unknown CLI error";
const PREVIEW_CHARS: usize = 200;

/// A successful CLI response.
///
/// Holds the parsed JSON exactly as the CLI printed it; accessors only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultEnvelope(Value);

impl ResultEnvelope {
    /// Wrap a parsed JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `success` flag, if present.
    pub fn success(&self) -> Option<bool> {
        self.0.get("success").and_then(Value::as_bool)
    }

    /// The `data` payload.
    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    /// Payment details, if a payment was made. `null` reads as `None`.
    pub fn payment(&self) -> Option<&Value> {
        self.0.get("payment").filter(|p| !p.is_null())
    }

    /// The `metadata` object.
    pub fn metadata(&self) -> Option<&Value> {
        self.0.get("metadata")
    }

    /// Borrow the raw JSON.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Render as indented JSON for tool output.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<ResultEnvelope> for Value {
    fn from(envelope: ResultEnvelope) -> Self {
        envelope.0
    }
}

/// Map a finished process onto an envelope or an error.
///
/// Whenever stdout parses as JSON the body decides: a non-zero exit code
/// with a success-shaped body is still a success.
pub fn interpret(outcome: &ProcessOutcome) -> Result<ResultEnvelope, BridgeError> {
    let stdout = outcome.stdout.trim();

    let value: Value = match serde_json::from_str(stdout) {
        Ok(value) => value,
        Err(_) => {
            let stderr = outcome.stderr.trim();
            let message = if stderr.is_empty() {
                match outcome.exit_code {
                    Some(code) => format!("CLI exited with code {code}"),
                    None => "CLI exited with code unknown (terminated by signal)".to_string(),
                }
            } else {
                stderr.to_string()
            };
            return Err(BridgeError::cli(message));
        }
    };

    let Some(object) = value.as_object() else {
        return Err(BridgeError::Parse {
            message: format!("Invalid JSON output: {}", preview(stdout)),
        });
    };

    if object.get("success").and_then(Value::as_bool) == Some(false) {
        let error = object.get("error");
        let field = |name: &str| {
            error
                .and_then(|e| e.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        return Err(BridgeError::Cli {
            code: field("code").unwrap_or_else(|| UNKNOWN_CODE.to_string()),
            message: field("message").unwrap_or_else(|| UNKNOWN_MESSAGE.to_string()),
        });
    }

    if outcome.exit_code.is_some_and(|code| code != 0) {
        tracing::warn!(
            exit_code = ?outcome.exit_code,
            "CLI exited non-zero with a success body; trusting the body"
        );
    }

    Ok(ResultEnvelope(value))
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
