//! Vault-level data: BTC pair yield plus the vault's own figures.

use super::poller::{Feed, PollSnapshot};
use crate::api::analytics::{FALLBACK_APY, btc_pair_apy, find_btc_pairs, weighted_apy};
use crate::api::{MarketData, PairData};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Default refresh interval for vault data.
pub const VAULT_REFRESH_MS: u64 = 60_000;

/// What the vault overview renders.
///
/// Only `apy`, `weighted_apy` and `btc_pairs` are live; the remaining
/// figures come from the seed until contract reads and a price feed exist.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultSnapshot {
    /// wBTC held by the vault.
    pub total_assets: Decimal,
    pub total_shares: Decimal,
    pub share_price: Decimal,
    /// Mean BTC pair APR, percent.
    pub apy: Decimal,
    /// TVL-weighted BTC pair APR, percent.
    pub weighted_apy: Decimal,
    /// USD.
    pub btc_price: Decimal,
    pub btc_pairs: Vec<PairData>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for VaultSnapshot {
    fn default() -> Self {
        Self {
            total_assets: dec!(45.67),
            total_shares: dec!(42.15),
            share_price: dec!(1.0834),
            apy: dec!(4.2),
            weighted_apy: dec!(4.2),
            btc_price: dec!(94250),
            btc_pairs: Vec::new(),
            is_loading: true,
            error: None,
            updated_at: None,
        }
    }
}

/// Values computed by one vault fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultUpdate {
    pub apy: Decimal,
    pub weighted_apy: Decimal,
    pub btc_pairs: Vec<PairData>,
}

impl PollSnapshot for VaultSnapshot {
    type Update = VaultUpdate;

    fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn apply(&mut self, update: VaultUpdate) {
        self.apy = update.apy;
        self.weighted_apy = update.weighted_apy;
        self.btc_pairs = update.btc_pairs;
        self.updated_at = Some(Utc::now());
    }
}

pub struct VaultDataFeed {
    source: Arc<dyn MarketData>,
}

impl VaultDataFeed {
    pub fn new(source: Arc<dyn MarketData>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Feed for VaultDataFeed {
    type Update = VaultUpdate;
    type Snapshot = VaultSnapshot;

    fn name(&self) -> &'static str {
        "vault-data"
    }

    async fn fetch(&self) -> Result<VaultUpdate> {
        let incentives = self.source.defi_spring_incentives().await?;
        let btc_pairs = find_btc_pairs(&incentives);

        let weighted = if btc_pairs.is_empty() {
            FALLBACK_APY
        } else {
            weighted_apy(&btc_pairs).round_dp(2)
        };

        Ok(VaultUpdate {
            apy: btc_pair_apy(&btc_pairs),
            weighted_apy: weighted,
            btc_pairs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DefiSpringIncentives, MockMarketData, TokenInfo};
    use crate::error::Error;
    use crate::feeds::{PollOptions, Poller};

    fn token(name: &str, symbol: &str) -> TokenInfo {
        TokenInfo {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: 8,
            l2_token_address: "0x0".to_string(),
            sort_order: 0,
            total_supply: None,
            logo_url: String::new(),
        }
    }

    fn pair(a: TokenInfo, b: TokenInfo, apr: Decimal, tvl: Decimal) -> PairData {
        PairData {
            token0: a,
            token1: b,
            current_apr: apr,
            volatility_in_ticks: Decimal::ZERO,
            last_allocation: Default::default(),
            considered_tvl: tvl,
        }
    }

    #[tokio::test]
    async fn test_fetch_keeps_only_btc_pairs() {
        let mut mock = MockMarketData::new();
        mock.expect_protocol_overview().times(0);
        mock.expect_defi_spring_incentives().returning(|| {
            Ok(DefiSpringIncentives {
                strk_price: dec!(0.2),
                total_strk: dec!(100),
                pairs: vec![
                    pair(token("Wrapped BTC", "WBTC"), token("USD Coin", "USDC"), dec!(0.10), dec!(100)),
                    pair(token("Ether", "ETH"), token("USD Coin", "USDC"), dec!(0.9), dec!(100)),
                    pair(token("Solv BTC", "SOLVBTC"), token("Wrapped BTC", "WBTC"), dec!(0.20), dec!(300)),
                ],
            })
        });

        let update = VaultDataFeed::new(Arc::new(mock)).fetch().await.unwrap();

        assert_eq!(update.btc_pairs.len(), 2);
        assert_eq!(update.btc_pairs[0].label(), "WBTC/USDC");
        assert_eq!(update.btc_pairs[1].label(), "SOLVBTC/WBTC");
        // mean(10, 20)
        assert_eq!(update.apy, dec!(15));
        // (10 * 100 + 20 * 300) / 400
        assert_eq!(update.weighted_apy, dec!(17.5));
    }

    #[tokio::test]
    async fn test_fetch_without_btc_pairs_uses_fallback() {
        let mut mock = MockMarketData::new();
        mock.expect_defi_spring_incentives().returning(|| {
            Ok(DefiSpringIncentives {
                strk_price: dec!(0.2),
                total_strk: dec!(100),
                pairs: vec![],
            })
        });

        let update = VaultDataFeed::new(Arc::new(mock)).fetch().await.unwrap();
        assert!(update.btc_pairs.is_empty());
        assert_eq!(update.apy, dec!(4.2));
    }

    #[tokio::test]
    async fn test_failure_leaves_vault_figures_untouched() {
        let mut mock = MockMarketData::new();
        mock.expect_defi_spring_incentives()
            .returning(|| Err(Error::application("Failed to fetch vault data")));

        let poller = Poller::new(
            VaultDataFeed::new(Arc::new(mock)),
            VaultSnapshot::default(),
            PollOptions::every_ms(VAULT_REFRESH_MS),
        );
        let mut rx = poller.subscribe();
        poller.refresh();
        rx.wait_for(|s| !s.is_loading).await.unwrap();

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.total_assets, dec!(45.67));
        assert_eq!(snapshot.share_price, dec!(1.0834));
        assert_eq!(snapshot.apy, dec!(4.2));
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Failed to fetch vault data")
        );
    }
}
