//! Chart panel state and its demo series.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Which chart the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Price,
    Cdr,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Price => "BTC Price (7d)",
            ChartKind::Cdr => "Dynamic vs Fixed CDR",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Price => ChartKind::Cdr,
            ChartKind::Cdr => ChartKind::Price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub label: &'static str,
    /// USD.
    pub price: Decimal,
    /// Billions USD.
    pub volume: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdrPoint {
    pub label: &'static str,
    pub dynamic: Decimal,
    pub fixed: Decimal,
}

pub const PRICE_SERIES: [PricePoint; 8] = [
    PricePoint { label: "7d ago", price: dec!(38500), volume: dec!(2.4) },
    PricePoint { label: "6d ago", price: dec!(39200), volume: dec!(3.1) },
    PricePoint { label: "5d ago", price: dec!(40100), volume: dec!(2.8) },
    PricePoint { label: "4d ago", price: dec!(41200), volume: dec!(3.5) },
    PricePoint { label: "3d ago", price: dec!(40800), volume: dec!(2.9) },
    PricePoint { label: "2d ago", price: dec!(41800), volume: dec!(3.2) },
    PricePoint { label: "1d ago", price: dec!(42200), volume: dec!(2.7) },
    PricePoint { label: "Now", price: dec!(42000), volume: dec!(3.0) },
];

pub const CDR_SERIES: [CdrPoint; 8] = [
    CdrPoint { label: "7d ago", dynamic: dec!(180), fixed: dec!(150) },
    CdrPoint { label: "6d ago", dynamic: dec!(175), fixed: dec!(150) },
    CdrPoint { label: "5d ago", dynamic: dec!(185), fixed: dec!(150) },
    CdrPoint { label: "4d ago", dynamic: dec!(190), fixed: dec!(150) },
    CdrPoint { label: "3d ago", dynamic: dec!(188), fixed: dec!(150) },
    CdrPoint { label: "2d ago", dynamic: dec!(182), fixed: dec!(150) },
    CdrPoint { label: "1d ago", dynamic: dec!(187), fixed: dec!(150) },
    CdrPoint { label: "Now", dynamic: dec!(185), fixed: dec!(150) },
];

/// Chart panel state.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    pub active: ChartKind,
}

impl ChartState {
    pub fn toggle(&mut self) {
        self.active = self.active.toggled();
    }

    pub fn latest_price(&self) -> Decimal {
        PRICE_SERIES[PRICE_SERIES.len() - 1].price
    }

    /// Change over the series, percent, two decimals.
    pub fn price_change_percent(&self) -> Decimal {
        let first = PRICE_SERIES[0].price;
        ((self.latest_price() - first) / first * dec!(100)).round_dp(2)
    }

    /// Price series rebased to its minimum, for sparkline rendering.
    pub fn price_sparkline(&self) -> Vec<u64> {
        rebase(PRICE_SERIES.iter().map(|p| p.price))
    }

    /// Dynamic CDR rebased to the fixed floor.
    pub fn cdr_sparkline(&self) -> Vec<u64> {
        CDR_SERIES
            .iter()
            .map(|p| to_u64(p.dynamic - p.fixed))
            .collect()
    }

    pub fn cdr_average(&self) -> Decimal {
        let sum: Decimal = CDR_SERIES.iter().map(|p| p.dynamic).sum();
        (sum / Decimal::from(CDR_SERIES.len())).round_dp(1)
    }
}

fn rebase(values: impl Iterator<Item = Decimal> + Clone) -> Vec<u64> {
    let min = values.clone().min().unwrap_or_default();
    values.map(|v| to_u64(v - min)).collect()
}

fn to_u64(value: Decimal) -> u64 {
    u64::try_from(value.round()).unwrap_or_default()
}
