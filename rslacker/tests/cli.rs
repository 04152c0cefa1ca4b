//! End-to-end tests driving the `rslacker` binary.

#![cfg(unix)]

use std::io::Write;

use mockito::Server;
use tokio::process::Command;

const ENV_VAR: &str = "RSLACKER_CONFIG";

fn rslacker() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rslacker"));
    cmd.env_remove(ENV_VAR).env_remove("RUST_LOG");
    cmd
}

fn echo_config(hook: &str) -> String {
    format!("prog = \"echo\"\nargs = [\"hi\"]\n\n[slack]\nhook = \"{hook}\"\n")
}

#[tokio::test]
async fn test_dry_run_from_environment_prints_config() {
    let dir = tempfile::tempdir().unwrap();

    let output = rslacker()
        .arg("--dry-run")
        .arg(dir.path().join("missing.toml"))
        .env(ENV_VAR, echo_config("http://127.0.0.1:9/hook"))
        .output()
        .await
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout.contains("running with config"));
    assert!(stdout.contains("\"echo\""));
    assert!(stdout.contains("\"hi\""));
}

#[tokio::test]
async fn test_dry_run_from_config_flag() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(echo_config("http://127.0.0.1:9/hook").as_bytes())
        .unwrap();

    let output = rslacker()
        .args(["--dry-run", "--config"])
        .arg(file.path())
        .output()
        .await
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("Always"));
}

#[tokio::test]
async fn test_missing_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = rslacker()
        .arg(dir.path().join("nonExistingConfigFile.toml"))
        .output()
        .await
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("no config file"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_invalid_env_config_exits_with_error() {
    let output = rslacker()
        .env(ENV_VAR, "invalid toml")
        .output()
        .await
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains(ENV_VAR), "{stderr}");
}

#[tokio::test]
async fn test_rejected_webhook_exits_with_response_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .with_status(500)
        .with_body("server error")
        .expect(1)
        .create_async()
        .await;

    let output = rslacker()
        .env(ENV_VAR, echo_config(&format!("{}/hook", server.url())))
        .output()
        .await
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("server error"), "{stderr}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_successful_run_exits_cleanly() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/hook")
        .match_body(mockito::Matcher::Regex("hi".to_string()))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let output = rslacker()
        .env(ENV_VAR, echo_config(&format!("{}/hook", server.url())))
        .output()
        .await
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    mock.assert_async().await;
}
