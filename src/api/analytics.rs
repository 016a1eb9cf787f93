//! Derived metrics over API responses.

use super::types::{DefiSpringIncentives, PairData, ProtocolOverview, TokenInfo};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// APY shown when no BTC pair is incentivised.
pub const FALLBACK_APY: Decimal = dec!(4.2);

/// Protocol TVL shown until a price-feed backed aggregation exists.
pub const PLACEHOLDER_TVL: Decimal = dec!(2100000);

/// Pairs where either side is bitcoin, in input order.
pub fn find_btc_pairs(data: &DefiSpringIncentives) -> Vec<PairData> {
    data.pairs
        .iter()
        .filter(|pair| pair.token0.is_btc() || pair.token1.is_btc())
        .cloned()
        .collect()
}

/// TVL-weighted APR over every pair, as a percentage.
///
/// Returns zero for an empty list or when the total TVL is zero.
pub fn calculate_weighted_apy(data: &DefiSpringIncentives) -> Decimal {
    weighted_apy(&data.pairs)
}

/// TVL-weighted APR over the given pairs, as a percentage.
pub fn weighted_apy(pairs: &[PairData]) -> Decimal {
    let (weighted, total_tvl) = pairs.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(weighted, total), pair| {
            (
                weighted + pair.apr_percent() * pair.considered_tvl,
                total + pair.considered_tvl,
            )
        },
    );

    if total_tvl.is_zero() {
        Decimal::ZERO
    } else {
        weighted / total_tvl
    }
}

/// Total protocol TVL in USD.
///
/// Token balances still need prices and decimal normalisation before they
/// can be summed, so this reports [`PLACEHOLDER_TVL`] for any input.
pub fn calculate_total_tvl(_overview: &ProtocolOverview, _tokens: &[TokenInfo]) -> Decimal {
    PLACEHOLDER_TVL
}

/// Unweighted mean APR of the given pairs, as a percentage.
pub fn average_pair_apy(pairs: &[PairData]) -> Option<Decimal> {
    if pairs.is_empty() {
        return None;
    }
    let sum: Decimal = pairs.iter().map(PairData::apr_percent).sum();
    Some(sum / Decimal::from(pairs.len()))
}

/// Headline APY: mean BTC pair APR rounded to one decimal, or [`FALLBACK_APY`].
pub fn btc_pair_apy(btc_pairs: &[PairData]) -> Decimal {
    average_pair_apy(btc_pairs)
        .map(|apy| apy.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(FALLBACK_APY)
}

/// Compact USD amount: `$2.1M`, `$950.0K`, `$12.50`.
pub fn format_usd_compact(value: Decimal) -> String {
    let abs = value.abs();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    let (scaled, dp, suffix) = if abs >= dec!(1_000_000_000) {
        (abs / dec!(1_000_000_000), 1, "B")
    } else if abs >= dec!(1_000_000) {
        (abs / dec!(1_000_000), 1, "M")
    } else if abs >= dec!(1_000) {
        (abs / dec!(1_000), 1, "K")
    } else {
        (abs, 2, "")
    };

    let rounded = scaled.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{sign}${rounded:.prec$}{suffix}", prec = dp as usize)
}

/// USD amount with thousands separators, no fractional digits: `$94,250`.
pub fn format_usd(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .trunc()
        .to_string();

    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value.is_sign_negative() && !value.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Percentage with trailing zeros trimmed: `185%`, `4.2%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str, symbol: &str) -> TokenInfo {
        TokenInfo {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
            l2_token_address: format!("0x{}", symbol.to_lowercase()),
            sort_order: 0,
            total_supply: None,
            logo_url: String::new(),
        }
    }

    fn pair(a: (&str, &str), b: (&str, &str), apr: Decimal, tvl: Decimal) -> PairData {
        PairData {
            token0: token(a.0, a.1),
            token1: token(b.0, b.1),
            current_apr: apr,
            volatility_in_ticks: Decimal::ZERO,
            last_allocation: Default::default(),
            considered_tvl: tvl,
        }
    }

    fn incentives(pairs: Vec<PairData>) -> DefiSpringIncentives {
        DefiSpringIncentives {
            strk_price: dec!(0.15),
            total_strk: dec!(1000),
            pairs,
        }
    }

    fn mixed_pairs() -> Vec<PairData> {
        vec![
            pair(("Ether", "ETH"), ("USD Coin", "USDC"), dec!(0.03), dec!(500)),
            pair(("Wrapped BTC", "WBTC"), ("USD Coin", "USDC"), dec!(0.05), dec!(200)),
            pair(("Starknet Token", "STRK"), ("Ether", "ETH"), dec!(0.08), dec!(100)),
            pair(("Ether", "ETH"), ("tBTC v2", "TBTC"), dec!(0.04), dec!(50)),
            pair(("USD Coin", "USDC"), ("Wrapped Bitcoin", "XYZ"), dec!(0.02), dec!(10)),
        ]
    }

    #[test]
    fn test_find_btc_pairs_filters_and_preserves_order() {
        let btc = find_btc_pairs(&incentives(mixed_pairs()));
        let labels: Vec<String> = btc.iter().map(PairData::label).collect();
        assert_eq!(labels, vec!["WBTC/USDC", "ETH/TBTC"]);
    }

    #[test]
    fn test_find_btc_pairs_matches_name_substring_only() {
        let data = incentives(vec![
            pair(("Wrapped BTC (bridged)", "XBT"), ("Ether", "ETH"), dec!(0.01), dec!(1)),
            pair(("Wrapped Bitcoin", "XYZ"), ("USD Coin", "USDC"), dec!(0.01), dec!(1)),
            pair(("Ether", "ETH"), ("solvBtc", "SBT"), dec!(0.01), dec!(1)),
        ]);
        let labels: Vec<String> = find_btc_pairs(&data).iter().map(PairData::label).collect();
        assert_eq!(labels, vec!["XBT/ETH", "ETH/SBT"]);
    }

    #[test]
    fn test_find_btc_pairs_symbol_must_match_exactly() {
        let data = incentives(vec![pair(
            ("Wrapped Token", "wbtc2"),
            ("Ether", "ETH"),
            dec!(0.01),
            dec!(1),
        )]);
        assert!(find_btc_pairs(&data).is_empty());
    }

    #[test]
    fn test_find_btc_pairs_empty() {
        assert!(find_btc_pairs(&incentives(vec![])).is_empty());
    }

    #[test]
    fn test_weighted_apy_example() {
        let data = incentives(vec![
            pair(("Ether", "ETH"), ("USD Coin", "USDC"), dec!(0.10), dec!(100)),
            pair(("Ether", "ETH"), ("Dai", "DAI"), dec!(0.20), dec!(300)),
        ]);
        // (10 * 100 + 20 * 300) / 400 = 17.5
        assert_eq!(calculate_weighted_apy(&data), dec!(17.5));
    }

    #[test]
    fn test_weighted_apy_empty_and_zero_tvl() {
        assert_eq!(calculate_weighted_apy(&incentives(vec![])), Decimal::ZERO);

        let zero_tvl = incentives(vec![
            pair(("Ether", "ETH"), ("USD Coin", "USDC"), dec!(0.10), dec!(0)),
            pair(("Ether", "ETH"), ("Dai", "DAI"), dec!(0.20), dec!(0)),
        ]);
        assert_eq!(calculate_weighted_apy(&zero_tvl), Decimal::ZERO);
    }

    #[test]
    fn test_weighted_apy_is_order_independent() {
        let forward = mixed_pairs();
        let mut reversed = mixed_pairs();
        reversed.reverse();
        let mut rotated = mixed_pairs();
        rotated.rotate_left(2);

        let expected = calculate_weighted_apy(&incentives(forward));
        assert_eq!(calculate_weighted_apy(&incentives(reversed)), expected);
        assert_eq!(calculate_weighted_apy(&incentives(rotated)), expected);
    }

    #[test]
    fn test_total_tvl_is_placeholder() {
        let overview = ProtocolOverview {
            timestamp: 0,
            tvl_by_token: vec![],
        };
        assert_eq!(calculate_total_tvl(&overview, &[]), dec!(2100000));
    }

    #[test]
    fn test_btc_pair_apy_rounds_and_falls_back() {
        assert_eq!(btc_pair_apy(&[]), FALLBACK_APY);

        let pairs = vec![
            pair(("Wrapped BTC", "WBTC"), ("USD Coin", "USDC"), dec!(0.0523), dec!(1)),
            pair(("Wrapped BTC", "WBTC"), ("Ether", "ETH"), dec!(0.0311), dec!(1)),
        ];
        // mean(5.23, 3.11) = 4.17
        assert_eq!(average_pair_apy(&pairs), Some(dec!(4.17)));
        assert_eq!(btc_pair_apy(&pairs), dec!(4.2));
    }

    #[test]
    fn test_format_usd_compact() {
        assert_eq!(format_usd_compact(dec!(2100000)), "$2.1M");
        assert_eq!(format_usd_compact(dec!(950000)), "$950.0K");
        assert_eq!(format_usd_compact(dec!(12.5)), "$12.50");
        assert_eq!(format_usd_compact(dec!(3240000000)), "$3.2B");
        assert_eq!(format_usd_compact(dec!(-1500)), "-$1.5K");
    }

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(dec!(94250)), "$94,250");
        assert_eq!(format_usd(dec!(1234567.6)), "$1,234,568");
        assert_eq!(format_usd(dec!(120)), "$120");
        assert_eq!(format_usd(dec!(0)), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(185)), "185%");
        assert_eq!(format_percent(dec!(4.20)), "4.2%");
    }
}
