//! Live data feeds backing the dashboard.
//!
//! Each feed owns one snapshot, seeded with placeholder values so the UI
//! never renders empty, and refreshed on an interval by a [`Poller`].

mod poller;
mod protocol;
mod vault;

pub use poller::{Feed, PollOptions, PollSnapshot, Poller};
pub use protocol::{
    MetricsSnapshot, PLACEHOLDER_CDR, PROTOCOL_REFRESH_MS, ProtocolStatsFeed, ProtocolStatsUpdate,
};
pub use vault::{VAULT_REFRESH_MS, VaultDataFeed, VaultSnapshot, VaultUpdate};

use crate::api::MarketData;
use crate::config::PollingConfig;
use std::sync::Arc;

/// Protocol stats poller configured from settings.
pub fn protocol_stats(
    source: Arc<dyn MarketData>,
    config: &PollingConfig,
) -> Poller<ProtocolStatsFeed> {
    Poller::start(
        ProtocolStatsFeed::new(source),
        MetricsSnapshot::default(),
        PollOptions::every_ms(config.protocol_refresh_ms).with_enabled(config.enabled),
    )
}

/// Vault data poller configured from settings.
pub fn vault_data(source: Arc<dyn MarketData>, config: &PollingConfig) -> Poller<VaultDataFeed> {
    Poller::start(
        VaultDataFeed::new(source),
        VaultSnapshot::default(),
        PollOptions::every_ms(config.vault_refresh_ms).with_enabled(config.enabled),
    )
}
