// ABOUTME: Interactive console for calling BoltzPay tools by name with JSON params.
// ABOUTME: Loads .env, configures the bridge from BOLTZPAY_* vars, then runs a REPL.

use std::sync::Arc;

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use boltzpay_tools::prelude::*;
use boltzpay_tools::tools::TOOL_PREFIX;

/// Split `<tool> [json]` into a full tool name and its params.
fn parse_line(line: &str) -> Result<(String, serde_json::Value)> {
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let name = if name.starts_with(&format!("{TOOL_PREFIX}_")) {
        name.to_string()
    } else {
        format!("{TOOL_PREFIX}_{name}")
    };

    let params = if rest.is_empty() {
        serde_json::json!({})
    } else if rest.starts_with('{') {
        serde_json::from_str(rest).context("params must be a JSON object")?
    } else {
        // Bare argument shorthand: `check https://...`
        serde_json::json!({ "url": rest })
    };

    Ok((name, params))
}

async fn print_tools(registry: &Registry) {
    for def in registry.to_definitions().await {
        println!("{}\n  {}", def.name, def.description);
        if let Some(props) = def.input_schema["properties"].as_object() {
            for (param, schema) in props {
                let desc = schema["description"].as_str().unwrap_or("");
                println!("    {param}: {desc}");
            }
        }
    }
}

async fn call(registry: &Registry, line: &str) -> Result<bool> {
    let (name, params) = parse_line(line)?;
    let result = registry.execute(&name, params).await?;
    if let Some(code) = result.error_code() {
        tracing::debug!(tool = %name, code, "tool returned an error");
    }
    println!("{}", result.content);
    Ok(!result.is_error)
}

async fn run_repl(registry: &Registry) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("BoltzPay tool console. Type 'tools' to list tools, 'quit' to exit.");
    println!("Usage: <tool> [json params], e.g. check {{\"url\": \"https://...\"}}\n");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        let _ = rl.add_history_entry(line);

        if line == "tools" || line == "help" {
            print_tools(registry).await;
            continue;
        }

        if let Err(e) = call(registry, line).await {
            eprintln!("Error: {e:#}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let bridge = Arc::new(Bridge::from_env()?);
    tracing::debug!(config = ?bridge.config(), "bridge configured");

    let registry = Registry::new();
    registry
        .register_all(all_tools(bridge, ErrorPolicy::Stringify))
        .await;

    // One-shot mode: `tool-console <tool> [json]`
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let ok = call(&registry, &args.join(" ")).await?;
        std::process::exit(if ok { 0 } else { 1 });
    }

    run_repl(&registry).await
}
