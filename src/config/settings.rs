//! Configuration settings for the Sats dashboard.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of environment variables overriding file settings (`SATS__API__BASE_URL`).
const ENV_PREFIX: &str = "SATS";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Market-data API configuration.
    pub api: ApiConfig,
    /// Feed refresh configuration.
    pub polling: PollingConfig,
    /// Wallet connector configuration.
    pub wallet: WalletConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered over defaults and under `SATS__*` variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        let defaults = ::config::Config::try_from(&Self::default())
            .map_err(|e| crate::Error::config(e.to_string()))?;

        ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::from(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn default_path() -> PathBuf {
        super::config_dir()
            .map(|p| p.join("config.toml"))
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }
}

/// Market-data API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://starknet-mainnet-api.ekubo.org".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Feed refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Master switch; when false no feed ever touches the network.
    pub enabled: bool,
    /// Protocol stats refresh interval in milliseconds (0 fetches once).
    pub protocol_refresh_ms: u64,
    /// Vault data refresh interval in milliseconds (0 fetches once).
    pub vault_refresh_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            protocol_refresh_ms: 30_000,
            vault_refresh_ms: 60_000,
        }
    }
}

/// Wallet connector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Starknet JSON-RPC endpoint used by the connector.
    pub rpc_url: String,
    /// Chain reported before any connector has been created.
    pub default_chain_id: String,
    /// Account the watch connector attaches to.
    pub account_address: Option<String>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.cartridge.gg/x/starknet/sepolia".to_string(),
            default_chain_id: crate::wallet::DEFAULT_CHAIN_ID.to_string(),
            account_address: None,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Open the guided tour on startup.
    pub show_guide_on_start: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            show_guide_on_start: false,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Refresh feeds.
    pub refresh: String,
    /// Connect the wallet.
    pub connect: String,
    /// Disconnect the wallet.
    pub disconnect: String,
    /// Open the deposit modal.
    pub deposit: String,
    /// Open the withdraw modal.
    pub withdraw: String,
    /// Open the borrow modal.
    pub borrow: String,
    /// Open the repay modal.
    pub repay: String,
    /// Toggle the guided tour.
    pub guide: String,
    /// Switch to the dashboard view.
    pub dashboard: String,
    /// Switch to the vault view.
    pub vault: String,
    /// Switch to the charts view.
    pub charts: String,
    /// Switch to the about view.
    pub about: String,
    /// Swap between the BTC price and CDR charts.
    pub toggle_chart: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            refresh: "r".to_string(),
            connect: "c".to_string(),
            disconnect: "x".to_string(),
            deposit: "d".to_string(),
            withdraw: "w".to_string(),
            borrow: "b".to_string(),
            repay: "p".to_string(),
            guide: "g".to_string(),
            dashboard: "1".to_string(),
            vault: "2".to_string(),
            charts: "3".to_string(),
            about: "4".to_string(),
            toggle_chart: "t".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
        }
    }
}
