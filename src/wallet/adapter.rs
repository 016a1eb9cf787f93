//! Uniform connect/disconnect surface over a lazily built connector.

use super::{WalletAccount, WalletCall, WalletConnector};
use crate::error::{Error, Result};
use tracing::{error, info, warn};

/// Builds the underlying connector on first use.
pub type ConnectorFactory = Box<dyn Fn() -> Result<Box<dyn WalletConnector>> + Send + Sync>;

/// Construct-on-first-call holder for a connector.
pub struct LazyConnector {
    factory: ConnectorFactory,
    instance: Option<Box<dyn WalletConnector>>,
}

impl LazyConnector {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn WalletConnector>> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            instance: None,
        }
    }

    /// The connector, building it if this is the first call.
    pub fn get_or_init(&mut self) -> Result<&mut (dyn WalletConnector + 'static)> {
        if self.instance.is_none() {
            self.instance = Some((self.factory)()?);
        }
        self.instance
            .as_deref_mut()
            .ok_or_else(|| Error::wallet("Wallet connector unavailable"))
    }

    pub fn get(&self) -> Option<&dyn WalletConnector> {
        self.instance.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut (dyn WalletConnector + 'static)> {
        self.instance.as_deref_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }

    /// Drop the connector so the next call builds a fresh one.
    pub fn reset(&mut self) {
        self.instance = None;
    }
}

/// Wallet state shared by the navbar and the action modals.
///
/// `is_connected()` is true only between a successful [`connect`] and the
/// next [`disconnect`] or failed reconnect, and never without a connector.
///
/// [`connect`]: WalletAdapter::connect
/// [`disconnect`]: WalletAdapter::disconnect
pub struct WalletAdapter {
    connector: LazyConnector,
    account: Option<WalletAccount>,
    chain_id: Option<String>,
    connected: bool,
    default_chain_id: String,
}

impl WalletAdapter {
    pub fn new(connector: LazyConnector, default_chain_id: impl Into<String>) -> Self {
        Self {
            connector,
            account: None,
            chain_id: None,
            connected: false,
            default_chain_id: default_chain_id.into(),
        }
    }

    /// Connect, building the connector on first use.
    ///
    /// On failure all state is reset to disconnected and the error returned.
    pub async fn connect(&mut self) -> Result<WalletAccount> {
        info!("Connecting wallet");

        let result = match self.connector.get_or_init() {
            Ok(connector) => connector.connect().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(account) => {
                info!(address = %account.address, chain = %account.chain_id, "Wallet connected");
                self.chain_id = Some(account.chain_id.clone());
                self.account = Some(account.clone());
                self.connected = true;
                Ok(account)
            }
            Err(e) => {
                error!(error = %e, "Failed to connect wallet");
                self.account = None;
                self.chain_id = None;
                self.connected = false;
                self.connector.reset();
                Err(e)
            }
        }
    }

    /// Best-effort disconnect: connector failures are logged, never returned.
    pub async fn disconnect(&mut self) {
        if self.connected
            && let Some(connector) = self.connector.get_mut()
            && let Err(e) = connector.disconnect().await
        {
            warn!(error = %e, "Failed to disconnect wallet");
        }

        if self.connected {
            info!("Wallet disconnected");
        }
        self.account = None;
        self.connected = false;
    }

    pub fn account(&self) -> Option<&WalletAccount> {
        self.account.as_ref()
    }

    /// Chain of the active connector, or the configured default before one exists.
    pub fn chain_id(&self) -> &str {
        match (&self.chain_id, self.connector.is_initialized()) {
            (Some(chain_id), true) => chain_id,
            _ => &self.default_chain_id,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Display name of the connector, once one has been built.
    pub fn connector_name(&self) -> Option<&'static str> {
        self.connector.get().map(|c| c.name())
    }

    /// Forward a raw request to the connected wallet.
    pub async fn request(&self, call: WalletCall) -> Result<serde_json::Value> {
        match self.connector.get() {
            Some(connector) if self.connected => connector.request(call).await,
            _ => Err(Error::wallet("Wallet connector not connected")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{DEFAULT_CHAIN_ID, MockWalletConnector};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MAINNET: &str = "0x534e5f4d41494e";

    fn account() -> WalletAccount {
        WalletAccount {
            address: "0xabc".to_string(),
            chain_id: MAINNET.to_string(),
        }
    }

    fn happy_connector() -> MockWalletConnector {
        let mut mock = MockWalletConnector::new();
        mock.expect_name().return_const("Mock Wallet");
        mock.expect_connect().returning(|| Ok(account()));
        mock.expect_disconnect().returning(|| Ok(()));
        mock.expect_request()
            .returning(|call| Ok(serde_json::json!({ "echo": call.method })));
        mock
    }

    fn counting<F>(builds: Arc<AtomicUsize>, make: F) -> LazyConnector
    where
        F: Fn() -> MockWalletConnector + Send + Sync + 'static,
    {
        LazyConnector::new(move || {
            builds.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(make()) as Box<dyn WalletConnector>)
        })
    }

    #[tokio::test]
    async fn test_lazy_connector_hands_out_mutable_connector() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut lazy = counting(Arc::clone(&builds), happy_connector);
        assert!(lazy.get_mut().is_none());
        assert!(!lazy.is_initialized());

        let connected = lazy.get_or_init().unwrap().connect().await.unwrap();
        assert_eq!(connected, account());
        assert!(lazy.get_mut().unwrap().disconnect().await.is_ok());
        lazy.get_or_init().unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        lazy.reset();
        assert!(lazy.get().is_none());
        lazy.get_or_init().unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_connector_built_lazily_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut adapter = WalletAdapter::new(
            counting(Arc::clone(&builds), happy_connector),
            DEFAULT_CHAIN_ID,
        );
        assert_eq!(builds.load(Ordering::SeqCst), 0);
        assert_eq!(adapter.chain_id(), DEFAULT_CHAIN_ID);

        let connected = adapter.connect().await.unwrap();
        assert_eq!(connected, account());
        assert!(adapter.is_connected());
        assert_eq!(adapter.account(), Some(&account()));
        assert_eq!(adapter.chain_id(), MAINNET);
        assert_eq!(adapter.connector_name(), Some("Mock Wallet"));

        adapter.disconnect().await;
        adapter.connect().await.unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_connect_resets_state() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut adapter = WalletAdapter::new(
            counting(Arc::clone(&builds), || {
                let mut mock = MockWalletConnector::new();
                mock.expect_connect()
                    .returning(|| Err(Error::wallet_rejected("user closed the popup")));
                mock
            }),
            DEFAULT_CHAIN_ID,
        );

        let err = adapter.connect().await.unwrap_err();
        assert!(matches!(err, Error::WalletRejected(_)));
        assert!(!adapter.is_connected());
        assert_eq!(adapter.account(), None);
        assert_eq!(adapter.chain_id(), DEFAULT_CHAIN_ID);

        // a retry rebuilds the connector from scratch
        assert!(adapter.connect().await.is_err());
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_factory_failure_is_propagated() {
        let mut adapter = WalletAdapter::new(
            LazyConnector::new(|| Err(Error::wallet("extension missing"))),
            DEFAULT_CHAIN_ID,
        );
        let err = adapter.connect().await.unwrap_err();
        assert_eq!(err.to_string(), "Wallet error: extension missing");
        assert!(!adapter.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_failure_is_swallowed() {
        let mut adapter = WalletAdapter::new(
            LazyConnector::new(|| {
                let mut mock = MockWalletConnector::new();
                mock.expect_connect().returning(|| Ok(account()));
                mock.expect_disconnect()
                    .times(1)
                    .returning(|| Err(Error::wallet("session already gone")));
                Ok(Box::new(mock) as Box<dyn WalletConnector>)
            }),
            DEFAULT_CHAIN_ID,
        );

        adapter.connect().await.unwrap();
        adapter.disconnect().await;
        assert!(!adapter.is_connected());
        assert_eq!(adapter.account(), None);
    }

    #[tokio::test]
    async fn test_disconnect_when_idle_skips_connector() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut adapter = WalletAdapter::new(
            counting(Arc::clone(&builds), MockWalletConnector::new),
            DEFAULT_CHAIN_ID,
        );
        adapter.disconnect().await;
        assert_eq!(builds.load(Ordering::SeqCst), 0);
        assert!(!adapter.is_connected());
    }

    #[tokio::test]
    async fn test_request_requires_connection() {
        let mut adapter = WalletAdapter::new(
            counting(Arc::new(AtomicUsize::new(0)), happy_connector),
            DEFAULT_CHAIN_ID,
        );

        let err = adapter
            .request(WalletCall::new("starknet_chainId", serde_json::json!([])))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Wallet(_)));

        adapter.connect().await.unwrap();
        let reply = adapter
            .request(WalletCall::new("starknet_chainId", serde_json::json!([])))
            .await
            .unwrap();
        assert_eq!(reply, serde_json::json!({ "echo": "starknet_chainId" }));
    }
}
