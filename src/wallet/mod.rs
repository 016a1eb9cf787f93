//! Wallet connection.
//!
//! The dashboard talks to wallets through [`WalletAdapter`], which builds
//! its underlying [`WalletConnector`] lazily on the first connect. Session
//! handshakes and signing stay inside the connector.

mod adapter;
mod rpc;

pub use adapter::{ConnectorFactory, LazyConnector, WalletAdapter};
pub use rpc::RpcWatchConnector;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Starknet Sepolia (`SN_SEPOLIA` as a felt).
pub const DEFAULT_CHAIN_ID: &str = "0x534e5f5345504f4c4941";

/// Starknet mainnet (`SN_MAIN` as a felt).
pub const MAINNET_CHAIN_ID: &str = "0x534e5f4d41494e";

/// Account handle returned by a successful connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
    pub chain_id: String,
}

impl WalletAccount {
    /// `0x1234…abcd` form for the navbar.
    pub fn short_address(&self) -> String {
        let addr = &self.address;
        if addr.len() <= 12 {
            addr.clone()
        } else {
            format!("{}…{}", &addr[..6], &addr[addr.len() - 4..])
        }
    }

    /// Human-readable network name.
    pub fn network(&self) -> &'static str {
        network_name(&self.chain_id)
    }
}

/// Network name for a chain id felt.
pub fn network_name(chain_id: &str) -> &'static str {
    match chain_id {
        DEFAULT_CHAIN_ID => "Sepolia",
        MAINNET_CHAIN_ID => "Mainnet",
        _ => "Unknown",
    }
}

/// A raw request forwarded to the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletCall {
    pub method: String,
    pub params: serde_json::Value,
}

impl WalletCall {
    pub fn new(method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// A third-party wallet connection capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletConnector: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// Run the connection handshake and return the connected account.
    async fn connect(&mut self) -> Result<WalletAccount>;

    async fn disconnect(&mut self) -> Result<()>;

    async fn chain_id(&self) -> Result<String>;

    async fn request(&self, call: WalletCall) -> Result<serde_json::Value>;
}
