//! Protocol-level stats: headline APY, TVL and CDR.

use super::poller::{Feed, PollSnapshot};
use crate::api::MarketData;
use crate::api::analytics::{btc_pair_apy, calculate_total_tvl, find_btc_pairs};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Default refresh interval for protocol stats.
pub const PROTOCOL_REFRESH_MS: u64 = 30_000;

/// Collateralization ratio reported until the vault contract is read directly.
pub const PLACEHOLDER_CDR: Decimal = dec!(185);

/// What the top stats strip renders.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    /// Percent.
    pub apy: Decimal,
    /// USD.
    pub tvl: Decimal,
    /// Percent.
    pub cdr: Decimal,
    pub is_loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            apy: dec!(4.2),
            tvl: dec!(2100000),
            cdr: PLACEHOLDER_CDR,
            is_loading: true,
            error: None,
            updated_at: None,
        }
    }
}

/// Values computed by one protocol stats fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolStatsUpdate {
    pub apy: Decimal,
    pub tvl: Decimal,
    pub cdr: Decimal,
}

impl PollSnapshot for MetricsSnapshot {
    type Update = ProtocolStatsUpdate;

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn apply(&mut self, update: ProtocolStatsUpdate) {
        self.apy = update.apy;
        self.tvl = update.tvl;
        self.cdr = update.cdr;
        self.updated_at = Some(Utc::now());
    }
}

/// Fetches incentives and overview together and derives the headline stats.
pub struct ProtocolStatsFeed {
    source: Arc<dyn MarketData>,
}

impl ProtocolStatsFeed {
    pub fn new(source: Arc<dyn MarketData>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Feed for ProtocolStatsFeed {
    type Update = ProtocolStatsUpdate;
    type Snapshot = MetricsSnapshot;

    fn name(&self) -> &'static str {
        "protocol-stats"
    }

    async fn fetch(&self) -> Result<ProtocolStatsUpdate> {
        let (incentives, overview) = tokio::try_join!(
            self.source.defi_spring_incentives(),
            self.source.protocol_overview()
        )?;

        let btc_pairs = find_btc_pairs(&incentives);

        Ok(ProtocolStatsUpdate {
            apy: btc_pair_apy(&btc_pairs),
            tvl: calculate_total_tvl(&overview, &[]),
            cdr: PLACEHOLDER_CDR,
        })
    }
}
