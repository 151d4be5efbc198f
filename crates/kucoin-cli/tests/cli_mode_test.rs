use std::process::{Command, Output};

use serde_json::{Value, json};
use tokio_test::assert_ok;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run_cli(config_path: &str, args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_kucoin-cli");
    Command::new(binary_path)
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("KUCOIN_API_KEY")
        .env_remove("KUCOIN_API_SECRET")
        .env_remove("KUCOIN_API_PASSPHRASE")
        .output()
        .expect("Failed to start kucoin-cli binary")
}

fn write_config(name: &str, server: &MockServer) -> String {
    let config = format!(
        r#"
credentials:
  api_key: "cli-key"
  secret_key: "cli-secret"
  passphrase: "cli-passphrase"
endpoints:
  spot: "{uri}"
  futures: "{uri}"
timeout_secs: 5
"#,
        uri = server.uri()
    );
    let path = std::env::temp_dir().join(format!("kucoin-cli-{}-{name}.yaml", std::process::id()));
    std::fs::write(&path, config).expect("write config");
    path.to_string_lossy().into_owned()
}

#[test]
fn cli_mode_with_config_and_dry_run_works() {
    let config_path = format!("{}/config/sandbox.yaml", env!("CARGO_MANIFEST_DIR"));
    let output = run_cli(&config_path, &["--dry-run"]);

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_mode_rejects_missing_config() {
    let output = run_cli("/nonexistent/kucoin.yaml", &["--dry-run"]);
    assert!(!output.status.success());
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_mode_prints_accounts_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("currency", "BTC"))
        .and(header_exists("KC-API-SIGN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "200000",
            "msg": "",
            "data": [{
                "id": "a-1",
                "currency": "BTC",
                "type": "main",
                "balance": "2",
                "available": "1.5",
                "holds": "0.5"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = write_config("accounts", &server);
    let output = assert_ok!(
        tokio::task::spawn_blocking(move || {
            run_cli(&config_path, &["accounts", "--currency", "BTC"])
        })
        .await
    );

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let printed: Value = assert_ok!(serde_json::from_slice(&output.stdout));
    assert_eq!(printed[0]["currency"], "BTC");
    assert_eq!(printed[0]["available"], "1.5");
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_mode_fails_on_business_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/orders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "400100",
            "msg": "order not exist."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config_path = write_config("cancel", &server);
    let output = assert_ok!(
        tokio::task::spawn_blocking(move || run_cli(&config_path, &["cancel", "missing"])).await
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("order not exist."));
}
