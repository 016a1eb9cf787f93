//! Market-data API integration.
//!
//! This module provides a typed client over the external market-data
//! API, the wire types it returns and the metrics derived from them.

pub mod analytics;
mod client;
mod types;

pub use client::{ApiClient, ApiClientBuilder};
pub use types::{
    DefiSpringIncentives, LastAllocation, PairData, ProtocolOverview, TokenBalance, TokenInfo,
};

use crate::error::Result;
use async_trait::async_trait;

/// The slice of the market-data API the dashboard feeds depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// `/overview`
    async fn protocol_overview(&self) -> Result<ProtocolOverview>;

    /// `/defi-spring-incentives`
    async fn defi_spring_incentives(&self) -> Result<DefiSpringIncentives>;
}
