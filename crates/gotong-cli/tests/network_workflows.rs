// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use gotong_contract::abi::{self, Token};
use gotong_model::{WalletAddress, PLACEHOLDER_IMAGE_URL, ZERO_ADDRESS};
use serde_json::{json, Value};

const CONTRACT: &str = "0x00000000000000000000000000000000000000c0";
const OWNER: &str = "0x00000000000000000000000000000000000000aa";
const DONOR: &str = "0x00000000000000000000000000000000000000d0";

#[derive(Default)]
struct Node {
    methods: Mutex<Vec<String>>,
    last_tx: Mutex<Option<Value>>,
}

fn address(raw: &str) -> Token {
    Token::Address(WalletAddress::parse(raw).expect("address"))
}

fn encoded(tokens: &[Token]) -> Value {
    json!(format!("0x{}", hex::encode(abi::encode_sequence(tokens))))
}

fn campaigns() -> Vec<Token> {
    vec![Token::Array(vec![
        Token::Tuple(vec![
            address(OWNER),
            Token::String("Perpustakaan Desa".to_string()),
            Token::String("Buku untuk anak".to_string()),
            Token::Uint(2_000_000_000_000_000_000),
            Token::Uint(4_000_000_000),
            Token::Uint(500_000_000_000_000_000),
            Token::String("https://example.com/p.png".to_string()),
            Token::Array(vec![address(DONOR)]),
            Token::Array(vec![Token::Uint(500_000_000_000_000_000)]),
        ]),
        Token::Tuple(vec![
            address(OWNER),
            Token::String("Sumur Bersih".to_string()),
            Token::String("Air untuk warga".to_string()),
            Token::Uint(1_000_000_000_000_000_000),
            Token::Uint(4_000_000_000),
            Token::Uint(0),
            Token::String(String::new()),
            Token::Array(vec![]),
            Token::Array(vec![]),
        ]),
    ])]
}

/// What the `campaigns(uint256)` getter returns for an id never written.
fn unknown_campaign() -> Vec<Token> {
    vec![
        address(ZERO_ADDRESS),
        Token::String(String::new()),
        Token::String(String::new()),
        Token::Uint(0),
        Token::Uint(0),
        Token::Uint(0),
        Token::String(String::new()),
    ]
}

async fn handle(State(node): State<Arc<Node>>, Json(req): Json<Value>) -> Json<Value> {
    let method = req["method"].as_str().unwrap_or_default().to_string();
    node.methods.lock().expect("methods").push(method.clone());
    let result = match method.as_str() {
        "eth_call" => {
            let data = req["params"][0]["data"].as_str().unwrap_or_default();
            if data.starts_with("0xa6b03633") {
                encoded(&campaigns())
            } else if data.starts_with("0x141961bc") {
                encoded(&unknown_campaign())
            } else {
                json!("0x")
            }
        }
        "eth_accounts" => json!([DONOR]),
        "eth_chainId" => json!("0xaa36a7"),
        "eth_sendTransaction" => {
            *node.last_tx.lock().expect("tx") = Some(req["params"][0].clone());
            json!(format!("0x{}", "cd".repeat(32)))
        }
        "eth_getTransactionReceipt" => json!({"status": "0x1"}),
        _ => Value::Null,
    };
    Json(json!({"jsonrpc": "2.0", "id": req["id"].clone(), "result": result}))
}

/// Serves the mock node from its own thread so the CLI can block on it.
fn spawn_node() -> (String, Arc<Node>) {
    let node = Arc::new(Node::default());
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.set_nonblocking(true).expect("nonblocking");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/", post(handle))
        .with_state(Arc::clone(&node));
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
            axum::serve(listener, app).await.expect("serve");
        });
    });
    (format!("http://{addr}/"), node)
}

fn gotong(home: &std::path::Path, rpc_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gotong"));
    for var in [
        "GOTONG_ACCOUNT",
        "GOTONG_CHAIN_ID",
        "GOTONG_CLIENT_ID",
        "GOTONG_WALLET_URL",
        "GOTONG_LOCALE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("xdg"))
        .env("GOTONG_CONTRACT_ADDRESS", CONTRACT)
        .env("GOTONG_RPC_URL", rpc_url)
        .env("GOTONG_RECEIPT_POLL_MS", "10");
    cmd
}

#[test]
fn list_reads_campaigns_with_view_fields() {
    let (url, _node) = spawn_node();
    let home = tempfile::tempdir().expect("tempdir");
    let output = gotong(home.path(), &url)
        .args(["--json", "campaigns", "list"])
        .output()
        .expect("run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload: Value = serde_json::from_slice(&output.stdout).expect("json");
    let rows = payload["campaigns"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], 0);
    assert_eq!(rows[0]["campaign"]["title"], "Perpustakaan Desa");
    assert_eq!(rows[0]["campaign"]["target"], "2000000000000000000");
    assert_eq!(rows[0]["progress"], 25.0);
    assert_eq!(rows[0]["collectedEther"], "0.5");
    assert_eq!(rows[1]["image"], PLACEHOLDER_IMAGE_URL);
}

#[test]
fn stats_count_campaigns_and_donators() {
    let (url, _node) = spawn_node();
    let home = tempfile::tempdir().expect("tempdir");
    let output = gotong(home.path(), &url)
        .args(["--json", "stats"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(payload["totalCampaigns"], 2);
    assert_eq!(payload["uniqueDonators"], 1);
    assert_eq!(payload["totalCollectedWei"], "500000000000000000");
}

#[test]
fn donate_connects_wallet_and_sends_value() {
    let (url, node) = spawn_node();
    let home = tempfile::tempdir().expect("tempdir");
    let output = gotong(home.path(), &url)
        .args(["--json", "--locale", "en", "campaigns", "donate", "1", "--amount", "0.25"])
        .output()
        .expect("run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let payload: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(payload["success"], true);
    assert_eq!(payload["message"], "Donation successful! Thank you for your support.");

    let tx = node.last_tx.lock().expect("tx").clone().expect("sent tx");
    assert_eq!(tx["from"], DONOR);
    assert_eq!(tx["to"], CONTRACT);
    assert_eq!(tx["value"], "0x3782dace9d90000");
    let methods = node.methods.lock().expect("methods").clone();
    assert!(methods.contains(&"eth_accounts".to_string()));
    assert!(methods.contains(&"eth_chainId".to_string()));
}

#[test]
fn explicit_account_skips_wallet_discovery() {
    let (url, node) = spawn_node();
    let home = tempfile::tempdir().expect("tempdir");
    let output = gotong(home.path(), &url)
        .args(["--account", OWNER, "campaigns", "donate", "0", "--amount", "1"])
        .output()
        .expect("run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let tx = node.last_tx.lock().expect("tx").clone().expect("sent tx");
    assert_eq!(tx["from"], OWNER);
    let methods = node.methods.lock().expect("methods").clone();
    assert!(!methods.contains(&"eth_accounts".to_string()));
}

#[test]
fn unknown_campaign_is_reported_as_not_found() {
    let (url, _node) = spawn_node();
    let home = tempfile::tempdir().expect("tempdir");
    let output = gotong(home.path(), &url)
        .args(["--json", "campaigns", "show", "9"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).expect("json");
    assert_eq!(err["code"], "campaign_not_found");
    assert_eq!(err["details"]["id"], "9");
}
