//! Wire types returned by the market-data API.
//!
//! These mirror the remote JSON exactly and are never mutated locally.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A token as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Starknet contract address of the token.
    pub l2_token_address: String,
    #[serde(default)]
    pub sort_order: i64,
    /// Raw supply; can exceed the range of `Decimal`.
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub logo_url: String,
}

impl TokenInfo {
    /// Whether this token looks like wrapped bitcoin.
    pub fn is_btc(&self) -> bool {
        self.symbol == "WBTC" || self.name.to_lowercase().contains("btc")
    }
}

/// Amounts last allocated to a pair by the incentive program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAllocation {
    pub token0_amount: Decimal,
    pub token1_amount: Decimal,
}

/// An incentivised pool pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairData {
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    /// Current APR as a fraction (0.05 = 5%).
    pub current_apr: Decimal,
    #[serde(default)]
    pub volatility_in_ticks: Decimal,
    #[serde(default)]
    pub last_allocation: LastAllocation,
    /// USD value considered for incentive weighting.
    pub considered_tvl: Decimal,
}

impl PairData {
    /// `SYM0/SYM1` label.
    pub fn label(&self) -> String {
        format!("{}/{}", self.token0.symbol, self.token1.symbol)
    }

    /// APR expressed as a percentage.
    pub fn apr_percent(&self) -> Decimal {
        self.current_apr * Decimal::ONE_HUNDRED
    }
}

/// Balance of a single token held by the protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Token address.
    pub token: String,
    /// Raw integer balance, kept as text.
    pub balance: String,
}

/// Response of `/overview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolOverview {
    /// Unix timestamp (seconds) of the snapshot.
    pub timestamp: i64,
    #[serde(default)]
    pub tvl_by_token: Vec<TokenBalance>,
}

impl ProtocolOverview {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Response of `/defi-spring-incentives`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefiSpringIncentives {
    pub strk_price: Decimal,
    pub total_strk: Decimal,
    #[serde(default)]
    pub pairs: Vec<PairData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const INCENTIVES: &str = r#"{
        "strkPrice": 0.1525,
        "totalStrk": 1250000,
        "pairs": [{
            "token0": {
                "name": "Wrapped BTC",
                "symbol": "WBTC",
                "decimals": 8,
                "l2_token_address": "0x03fe2b97c1fd336e750087d68b9b867997fd64a2661ff3ca5a7c771641e8e7ac",
                "sort_order": 1,
                "total_supply": null,
                "logo_url": "https://example.org/wbtc.svg"
            },
            "token1": {
                "name": "USD Coin",
                "symbol": "USDC",
                "decimals": 6,
                "l2_token_address": "0x053c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8",
                "sort_order": 2,
                "total_supply": 1.5e27,
                "logo_url": "https://example.org/usdc.svg"
            },
            "currentApr": 0.0523,
            "volatilityInTicks": 120.5,
            "lastAllocation": { "token0Amount": 10, "token1Amount": 25.5 },
            "consideredTvl": 845000.25
        }]
    }"#;

    #[test]
    fn test_decode_incentives() {
        let data: DefiSpringIncentives = serde_json::from_str(INCENTIVES).unwrap();
        assert_eq!(data.strk_price, dec!(0.1525));
        assert_eq!(data.pairs.len(), 1);

        let pair = &data.pairs[0];
        assert_eq!(pair.label(), "WBTC/USDC");
        assert_eq!(pair.current_apr, dec!(0.0523));
        assert_eq!(pair.apr_percent(), dec!(5.2300));
        assert_eq!(pair.considered_tvl, dec!(845000.25));
        assert_eq!(pair.last_allocation.token1_amount, dec!(25.5));
        assert_eq!(pair.token0.total_supply, None);
        assert!(pair.token1.total_supply.is_some());
    }

    #[test]
    fn test_decode_overview() {
        let overview: ProtocolOverview = serde_json::from_str(
            r#"{"timestamp": 1735689600, "tvlByToken": [{"token": "0x1", "balance": "123456789012345678901234"}]}"#,
        )
        .unwrap();
        assert_eq!(overview.tvl_by_token.len(), 1);
        assert_eq!(overview.tvl_by_token[0].balance, "123456789012345678901234");
        assert_eq!(
            overview.observed_at().map(|t| t.to_rfc3339()),
            Some("2025-01-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_is_btc_matches_symbol_or_name() {
        let data: DefiSpringIncentives = serde_json::from_str(INCENTIVES).unwrap();
        assert!(data.pairs[0].token0.is_btc());
        assert!(!data.pairs[0].token1.is_btc());
    }
}
