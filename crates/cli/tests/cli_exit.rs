//! Process-level tests: exit status and `--json` output of the built binary.

use std::net::SocketAddr;
use std::process::Output;

use axum::Router;
use axum::routing::get;
use tokio::process::Command;

async fn spawn_backend(id: &'static str) -> SocketAddr {
    let app = Router::new().route(
        "/",
        get(move || async move { format!("Hi there, I'm served from ip-{}!", id.replace('.', "-")) }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_verify-roundrobin"))
        .args(args)
        .env("RUST_LOG", "off")
        .env_remove("VERIFIER_MODE")
        .env_remove("VERIFIER_TIMEOUT_SECS")
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_exit_zero_on_success() {
    let addr = spawn_backend("10.0.0.1").await;

    let output = run_binary(&[&addr.to_string(), "10.0.0.1", "--json"]).await;

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["requests_issued"], 1);
    assert_eq!(report["mode"], "sequential");
}

#[tokio::test]
async fn test_exit_two_on_empty_backend_list() {
    let output = run_binary(&["lb.example.com", ""]).await;
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn test_exit_two_on_usage_error() {
    let output = run_binary(&["lb.example.com"]).await;
    assert_eq!(output.status.code(), Some(2));
}

#[tokio::test]
async fn test_exit_three_on_refused_connection() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let output = run_binary(&[&addr.to_string(), "10.0.0.1"]).await;
    assert_eq!(output.status.code(), Some(3));
}

#[tokio::test]
async fn test_exit_one_on_wrong_backend_with_json_failure() {
    let addr = spawn_backend("10.0.0.9").await;

    let output = run_binary(&[&addr.to_string(), "10.0.0.1,10.0.0.2", "--json"]).await;

    assert_eq!(output.status.code(), Some(1));
    let failure: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(failure["status"], "failed");
    assert_eq!(failure["kind"], "assertion");
    assert!(failure["error"].as_str().unwrap().contains("ip-10-0-0-9!"));
}
