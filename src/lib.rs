//! # Sats dashboard
//!
//! Terminal dashboard and deployment tooling for the Sats BTC vault on
//! Starknet. Built with ratatui, reqwest and tokio.
//!
//! ## Architecture
//!
//! - **API**: typed client over the market-data service and derived metrics
//! - **Feeds**: interval pollers keeping protocol and vault snapshots fresh
//! - **Wallet**: connector adapter around a lazily built wallet session
//! - **Deploy**: contract artifact loading and declare + deploy submission
//! - **State**: centralized store driven by actions
//! - **Events** / **UI** / **App**: terminal input, rendering and the main loop
//! - **Config**: configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod deploy;
pub mod error;
pub mod events;
pub mod feeds;
pub mod state;
pub mod ui;
pub mod wallet;

pub use api::{ApiClient, MarketData};
pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use feeds::{MetricsSnapshot, Poller, VaultSnapshot};
pub use wallet::{WalletAccount, WalletAdapter, WalletConnector};
