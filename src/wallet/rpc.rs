//! Watch-only connector backed by a Starknet JSON-RPC node.
//!
//! Connecting verifies the configured account is deployed on the node's
//! chain. Nothing is ever signed; write requests are refused.

use super::{WalletAccount, WalletCall, WalletConnector};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

const RPC_TIMEOUT: Duration = Duration::from_secs(15);

/// Methods forwarded by [`RpcWatchConnector::request`].
const READ_ONLY_PREFIXES: &[&str] = &["starknet_get", "starknet_call", "starknet_chainId", "starknet_blockNumber"];

#[derive(Debug, Deserialize)]
struct RpcReply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcFault>,
}

#[derive(Debug, Deserialize)]
struct RpcFault {
    code: i64,
    message: String,
}

pub struct RpcWatchConnector {
    rpc_url: String,
    address: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl RpcWatchConnector {
    pub fn new(rpc_url: impl Into<String>, address: impl AsRef<str>) -> Result<Self> {
        let address = normalize_address(address.as_ref())?;
        let rpc_url = rpc_url.into();
        let http = reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|source| Error::RemoteTransport {
                endpoint: rpc_url.clone(),
                source,
            })?;

        Ok(Self {
            rpc_url,
            address,
            http,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "JSON-RPC request");

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let transport = |source| Error::RemoteTransport {
            endpoint: method.to_string(),
            source,
        };

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteRequest {
                status: status.as_u16(),
                endpoint: method.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let reply: RpcReply = serde_json::from_slice(&bytes)?;

        match reply {
            RpcReply {
                error: Some(fault), ..
            } => Err(Error::wallet(format!(
                "{method} failed: {} (code {})",
                fault.message, fault.code
            ))),
            RpcReply {
                result: Some(value),
                ..
            } => Ok(value),
            _ => Err(Error::wallet(format!("{method} returned no result"))),
        }
    }
}

#[async_trait]
impl WalletConnector for RpcWatchConnector {
    fn id(&self) -> &'static str {
        "rpc-watch"
    }

    fn name(&self) -> &'static str {
        "Watch-only (RPC)"
    }

    async fn connect(&mut self) -> Result<WalletAccount> {
        let chain_id = self.chain_id().await?;

        self.call("starknet_getClassHashAt", json!(["latest", self.address]))
            .await
            .map_err(|e| match e {
                Error::Wallet(msg) => Error::wallet_rejected(format!(
                    "account {} is not deployed: {msg}",
                    self.address
                )),
                other => other,
            })?;

        Ok(WalletAccount {
            address: self.address.clone(),
            chain_id,
        })
    }

    async fn disconnect(&mut self) -> Result<()> {
        // no session to tear down
        Ok(())
    }

    async fn chain_id(&self) -> Result<String> {
        match self.call("starknet_chainId", json!([])).await? {
            Value::String(chain_id) => Ok(chain_id),
            other => Err(Error::wallet(format!("unexpected chain id: {other}"))),
        }
    }

    async fn request(&self, call: WalletCall) -> Result<Value> {
        if !READ_ONLY_PREFIXES.iter().any(|p| call.method.starts_with(p)) {
            return Err(Error::wallet_rejected(format!(
                "{} needs a signing wallet",
                call.method
            )));
        }
        self.call(&call.method, call.params).await
    }
}

/// Lowercase `0x`-prefixed felt with 1 to 64 hex digits.
fn normalize_address(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| Error::invalid_input(format!("address must start with 0x: {trimmed}")))?;

    if digits.is_empty() || digits.len() > 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::invalid_input(format!(
            "not a Starknet address: {trimmed}"
        )));
    }

    Ok(format!("0x{}", digits.to_ascii_lowercase()))
}
