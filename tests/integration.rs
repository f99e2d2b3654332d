// ABOUTME: Integration tests running the bridge and tools against a fake launcher script.
// ABOUTME: The script mimics `npx -y @boltzpay/cli ... --json` using FAKE_CLI_* env vars.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use boltzpay_tools::prelude::*;
use serde_json::json;

const FAKE_CLI: &str = r#"#!/bin/sh
if [ -n "$FAKE_CLI_ARGV" ]; then
  printf '%s\n' "$@" > "$FAKE_CLI_ARGV"
fi
case "$FAKE_CLI_MODE" in
  success)
    printf '%s' '{"success":true,"data":{"isPaid":true,"price":{"amount":"0.01","currency":"USDC"}},"payment":{"txHash":"0xabc","chain":"base"},"metadata":{"protocol":"x402","durationMs":812}}'
    ;;
  auth_missing)
    printf '%s' '{"success":false,"error":{"code":"AUTH_MISSING","message":"Coinbase credentials not configured"}}'
    exit 1
    ;;
  stderr)
    echo 'npm ERR! something broke'
    echo 'Something went wrong on stderr' >&2
    exit 1
    ;;
  silent)
    exit 7
    ;;
  nonzero_success)
    printf '%s' '{"success":true,"data":{"ok":true}}'
    exit 3
    ;;
  sleep)
    echo $$ > "$FAKE_CLI_PID"
    exec sleep 30
    ;;
  background)
    sleep 30 &
    echo $! > "$FAKE_CLI_PID"
    printf '%s' '{"success":true,"data":1}'
    exit 0
    ;;
  grandchild)
    sleep 30 &
    echo $! > "$FAKE_CLI_PID"
    wait
    ;;
esac
"#;

/// Write the fake launcher once, before any test forks a child.
fn fake_launcher() -> &'static Path {
    static LAUNCHER: OnceLock<(tempfile::TempDir, PathBuf)> = OnceLock::new();
    let (_dir, path) = LAUNCHER.get_or_init(|| {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fake-npx");
        std::fs::write(&path, FAKE_CLI).expect("write fake launcher");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake launcher");
        (dir, path)
    });
    path
}

/// Wait up to two seconds for `pid` to exit. Zombies count as gone.
#[cfg(target_os = "linux")]
fn process_gone(pid: &str) -> bool {
    let stat = PathBuf::from(format!("/proc/{}/stat", pid.trim()));
    for _ in 0..40 {
        match std::fs::read_to_string(&stat) {
            Err(_) => return true,
            Ok(text) => {
                let state = text.rsplit(')').next().unwrap_or("").trim_start();
                if state.starts_with('Z') {
                    return true;
                }
            }
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    false
}

fn config_for(mode: &str) -> BridgeConfig {
    BridgeConfig::new()
        .launcher(fake_launcher().to_string_lossy())
        .env("FAKE_CLI_MODE", mode)
}

#[tokio::test]
async fn test_success_envelope_round_trips() {
    let bridge = Bridge::new(config_for("success"));
    let envelope = bridge.run("check", ["https://x/api"]).await.unwrap();

    assert_eq!(envelope.success(), Some(true));
    assert_eq!(
        envelope.data(),
        Some(&json!({"isPaid": true, "price": {"amount": "0.01", "currency": "USDC"}}))
    );
    assert_eq!(
        envelope.payment(),
        Some(&json!({"txHash": "0xabc", "chain": "base"}))
    );
    assert_eq!(
        envelope.metadata(),
        Some(&json!({"protocol": "x402", "durationMs": 812}))
    );
}

#[tokio::test]
async fn test_child_receives_launcher_args() {
    let out = tempfile::tempdir().unwrap();
    let argv_file = out.path().join("argv");
    let config = config_for("success").env("FAKE_CLI_ARGV", argv_file.to_string_lossy());
    let bridge = Arc::new(Bridge::new(config));

    let tool = FetchTool::new(bridge, ErrorPolicy::Raise);
    tool.execute(json!({"url": "https://x/api", "chain": "svm"}))
        .await
        .unwrap();

    let argv = std::fs::read_to_string(&argv_file).unwrap();
    assert_eq!(
        argv.lines().collect::<Vec<_>>(),
        vec![
            "-y",
            "@boltzpay/cli",
            "fetch",
            "https://x/api",
            "--method",
            "GET",
            "--chain",
            "svm",
            "--json"
        ]
    );
}

#[tokio::test]
async fn test_cli_error_envelope() {
    let bridge = Bridge::new(config_for("auth_missing"));
    let err = bridge.run("fetch", ["https://x/api"]).await.unwrap_err();

    assert_eq!(err.code(), "AUTH_MISSING");
    assert_eq!(err.message(), "Coinbase credentials not configured");
}

#[tokio::test]
async fn test_non_json_output_falls_back_to_stderr() {
    let bridge = Bridge::new(config_for("stderr"));
    let err = bridge.run("fetch", ["https://x/api"]).await.unwrap_err();

    assert_eq!(err.code(), "CLI_ERROR");
    assert!(err.message().contains("Something went wrong on stderr"));
}

#[tokio::test]
async fn test_no_output_reports_exit_code() {
    let bridge = Bridge::new(config_for("silent"));
    let err = bridge.run("budget", Vec::<String>::new()).await.unwrap_err();

    assert_eq!(err.code(), "CLI_ERROR");
    assert!(err.message().contains("exited with code 7"));
}

#[tokio::test]
async fn test_success_body_wins_over_exit_code() {
    let bridge = Bridge::new(config_for("nonzero_success"));
    let envelope = bridge.run("wallet", Vec::<String>::new()).await.unwrap();

    assert_eq!(envelope.data(), Some(&json!({"ok": true})));
}

#[tokio::test]
async fn test_timeout_kills_child() {
    let out = tempfile::tempdir().unwrap();
    let pid_file = out.path().join("pid");
    let config = config_for("sleep").env("FAKE_CLI_PID", pid_file.to_string_lossy());
    let bridge = Bridge::new(config);

    let invocation = Invocation::new("fetch", ["https://slow/api"]).timeout(Duration::from_millis(500));
    let started = std::time::Instant::now();
    let err = bridge.execute(&invocation).await.unwrap_err();

    assert_eq!(err.code(), "TIMEOUT");
    assert!(err.message().contains("0.5"));
    assert!(started.elapsed() < Duration::from_secs(10));

    #[cfg(target_os = "linux")]
    {
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(process_gone(&pid), "child {} still running", pid.trim());
    }
}

#[tokio::test]
async fn test_timeout_kills_launcher_descendants() {
    let out = tempfile::tempdir().unwrap();
    let pid_file = out.path().join("pid");
    let config = config_for("grandchild").env("FAKE_CLI_PID", pid_file.to_string_lossy());
    let bridge = Bridge::new(config);

    let invocation = Invocation::new("fetch", ["https://slow/api"]).timeout(Duration::from_millis(500));
    let err = bridge.execute(&invocation).await.unwrap_err();
    assert_eq!(err.code(), "TIMEOUT");

    #[cfg(target_os = "linux")]
    {
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(process_gone(&pid), "descendant {} still running", pid.trim());
    }
}

#[tokio::test]
async fn test_timeout_covers_output_held_open_by_background_process() {
    let out = tempfile::tempdir().unwrap();
    let pid_file = out.path().join("pid");
    let config = config_for("background").env("FAKE_CLI_PID", pid_file.to_string_lossy());
    let bridge = Bridge::new(config);

    let invocation = Invocation::new("fetch", ["https://x/api"]).timeout(Duration::from_secs(1));
    let started = std::time::Instant::now();
    let err = bridge.execute(&invocation).await.unwrap_err();

    assert_eq!(err.code(), "TIMEOUT");
    assert!(started.elapsed() < Duration::from_secs(10));

    #[cfg(target_os = "linux")]
    {
        let pid = std::fs::read_to_string(&pid_file).unwrap();
        assert!(process_gone(&pid), "background {} still running", pid.trim());
    }
}

#[tokio::test]
async fn test_missing_launcher() {
    let config = BridgeConfig::new().launcher("boltzpay-no-such-launcher-4f1c");
    let bridge = Arc::new(Bridge::new(config));

    let err = bridge.run("check", ["https://x/api"]).await.unwrap_err();
    assert_eq!(err, BridgeError::NodeNotFound);

    let tool = CheckTool::new(bridge, ErrorPolicy::Stringify);
    let result = tool.execute(json!({"url": "https://x/api"})).await.unwrap();
    assert!(result.is_error);
    assert!(result.content.starts_with("Error (NODE_NOT_FOUND): "));
    assert!(result.content.contains("https://nodejs.org"));
}

#[test]
fn test_blocking_call() {
    let bridge = Arc::new(Bridge::new(config_for("success")));
    let tool = QuoteTool::new(bridge, ErrorPolicy::Raise);

    let result = tool.execute_blocking(json!({"url": "https://x/api"})).unwrap();
    assert!(!result.is_error);
    assert_eq!(result.json().unwrap()["data"]["isPaid"], true);
}

#[test]
fn test_blocking_stringified_error() {
    let bridge = Arc::new(Bridge::new(config_for("auth_missing")));
    let tool = FetchTool::new(bridge, ErrorPolicy::Stringify);

    let result = tool.execute_blocking(json!({"url": "https://x/api"})).unwrap();
    assert_eq!(
        result.content,
        "Error (AUTH_MISSING): Coinbase credentials not configured"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_are_independent() {
    let bridge = Arc::new(Bridge::new(config_for("success")));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bridge = bridge.clone();
            tokio::spawn(async move {
                bridge
                    .run("check", [format!("https://x/api/{i}")])
                    .await
            })
        })
        .collect();

    for handle in handles {
        let envelope = handle.await.unwrap().unwrap();
        assert_eq!(envelope.success(), Some(true));
    }
}

#[tokio::test]
async fn test_registry_hosts_all_tools() {
    let registry = Registry::new();
    let bridge = Arc::new(Bridge::new(config_for("success")));
    registry
        .register_all(all_tools(bridge, ErrorPolicy::Stringify))
        .await;

    assert_eq!(
        registry.list().await,
        vec![
            "boltzpay_budget",
            "boltzpay_check",
            "boltzpay_discover",
            "boltzpay_fetch",
            "boltzpay_history",
            "boltzpay_quote",
            "boltzpay_wallet"
        ]
    );

    let defs = registry.to_definitions().await;
    assert!(defs.iter().all(|d| !d.description.is_empty()));

    let result = registry
        .execute("boltzpay_discover", json!({"category": "demo"}))
        .await
        .unwrap();
    assert!(!result.is_error);
    assert_eq!(result.metadata["command"], "discover");
}
