//! Shared utilities for integration testing: an in-process mock node that
//! speaks just enough JSON-RPC (and Safe transaction service REST) for the
//! link flows.

#![allow(dead_code)]

use alloy::primitives::{hex, keccak256, Address, U256};
use alloy::sol_types::SolValue;
use serde_json::{json, Value};
use std::sync::Arc;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use safe2link::config::LinkConfig;
use safe2link::config::NetworkOverride;

pub const LOCAL_CHAIN_ID: u64 = 31337;

/// Chain state served by the mock node.
#[derive(Debug)]
pub struct MockChain {
    pub chain_id: u64,
    pub link_count: u64,
    pub decimals: u8,
    pub link: (Address, U256, Address, bool),
    pub safe_owners: Vec<Address>,
    /// Receipt status for every queried transaction. `None` keeps it pending.
    pub receipt_status: Option<bool>,
    /// Raw transactions received via `eth_sendRawTransaction`, hex encoded.
    pub raw_txs: Mutex<Vec<String>>,
    /// `eth_call` targets and calldata, hex encoded.
    pub calls: Mutex<Vec<(String, String)>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self {
            chain_id: LOCAL_CHAIN_ID,
            link_count: 7,
            decimals: 6,
            link: (
                Address::repeat_byte(0xaa),
                U256::from(1_500_000u64),
                Address::repeat_byte(0xbb),
                false,
            ),
            safe_owners: vec![Address::repeat_byte(0x01), Address::repeat_byte(0x02)],
            receipt_status: None,
            raw_txs: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

/// Start the mock node on an ephemeral port and return its base URL.
pub async fn start_mock_node(chain: Arc<MockChain>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let chain = chain.clone();
                    tokio::spawn(async move {
                        let _ = serve(socket, chain).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

/// Config pointing the localhost network at `url`.
pub fn local_config(url: &str, manager: Option<Address>) -> LinkConfig {
    let mut config = LinkConfig::default();
    config.providers.rpc_timeout_secs = 5;
    config.safe.chain_id = LOCAL_CHAIN_ID;
    config.safe.address = Some("0x000000000000000000000000000000000000dEaD".to_string());
    config.networks.insert(
        "localhost".to_string(),
        NetworkOverride {
            rpc_url: Some(url.to_string()),
            module_address: None,
            manager_address: manager.map(|a| a.to_string()),
        },
    );
    config
}

/// Scratch directory unique to one test.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("safe2link-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn serve(mut socket: TcpStream, chain: Arc<MockChain>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let request_line = head.lines().next().unwrap_or_default().to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let (status, body) = if request_line.starts_with("GET ") {
        safe_service_response(&request_line, &chain)
    } else {
        let request: Value = serde_json::from_slice(&buf[header_end..]).unwrap_or(Value::Null);
        ("200 OK", rpc_response(&request, &chain).to_string())
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

fn safe_service_response(request_line: &str, chain: &MockChain) -> (&'static str, String) {
    let path = request_line.split_whitespace().nth(1).unwrap_or_default();
    match path.strip_prefix("/api/v1/safes/") {
        Some(rest) => {
            let address = rest.trim_end_matches('/');
            let body = json!({
                "address": address,
                "nonce": "3",
                "threshold": 2,
                "owners": chain.safe_owners,
                "masterCopy": Address::ZERO,
            });
            ("200 OK", body.to_string())
        }
        None => ("404 Not Found", "{}".to_string()),
    }
}

fn rpc_response(request: &Value, chain: &MockChain) -> Value {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];

    let result = match method {
        "eth_chainId" => json!(format!("0x{:x}", chain.chain_id)),
        "eth_blockNumber" => json!("0x10"),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_gasPrice" => json!("0x3b9aca00"),
        "eth_getTransactionReceipt" => match chain.receipt_status {
            Some(success) => receipt(&params[0], success),
            None => Value::Null,
        },
        "eth_sendRawTransaction" => {
            let raw = params[0].as_str().unwrap_or_default().to_string();
            let hash = keccak256(hex::decode(&raw).unwrap_or_default());
            chain.raw_txs.lock().unwrap().push(raw);
            json!(hash)
        }
        "eth_call" => {
            let call = &params[0];
            let to = call["to"].as_str().unwrap_or_default().to_lowercase();
            let data = call
                .get("input")
                .or_else(|| call.get("data"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase();
            chain.calls.lock().unwrap().push((to, data.clone()));

            let selector = data.trim_start_matches("0x").get(..8).unwrap_or_default();
            let encoded = match selector {
                "ef51b79d" => U256::from(chain.link_count).abi_encode(),
                "313ce567" => U256::from(chain.decimals).abi_encode(),
                "393b6df3" => chain.link.abi_encode_params(),
                _ => {
                    return json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": { "code": 3, "message": "execution reverted" },
                    })
                }
            };
            json!(format!("0x{}", hex::encode(encoded)))
        }
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("method {} not found", method) },
            })
        }
    };

    json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

/// A mined legacy receipt one block below the mock head.
fn receipt(tx_hash: &Value, success: bool) -> Value {
    json!({
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "ab".repeat(32)),
        "blockNumber": "0xf",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": Address::repeat_byte(0x01),
        "to": Address::repeat_byte(0x02),
        "contractAddress": null,
    })
}
