//! Smoke test for the market-data API.
//!
//! Hits `/overview`, `/defi-spring-incentives` and `/overview/tvl` and
//! prints a short report. Exits 1 if any request or decode fails.

use anyhow::{Context, bail};
use sats_dashboard::api::analytics::{find_btc_pairs, format_usd, weighted_apy};
use sats_dashboard::api::{DefiSpringIncentives, ProtocolOverview};
use sats_dashboard::{ApiClient, Config};
use serde_json::Value;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn report(
    overview: &ProtocolOverview,
    incentives: &DefiSpringIncentives,
    tvl: &Value,
) -> anyhow::Result<Vec<String>> {
    let Some(tvl_entries) = tvl.as_array() else {
        bail!("/overview/tvl did not return a list");
    };

    let mut lines = vec![
        format!("Overview timestamp: {}", overview.timestamp),
        format!("Tokens with TVL: {}", overview.tvl_by_token.len()),
        format!("STRK price: ${}", incentives.strk_price.normalize()),
        format!("Total pairs: {}", incentives.pairs.len()),
    ];

    let btc_pairs = find_btc_pairs(incentives);
    lines.push(format!("BTC-related pairs: {}", btc_pairs.len()));
    for (i, pair) in btc_pairs.iter().enumerate() {
        lines.push(format!(
            "  {}. {}  APR {:.3}%  TVL {}",
            i + 1,
            pair.label(),
            pair.apr_percent(),
            format_usd(pair.considered_tvl)
        ));
    }
    if !btc_pairs.is_empty() {
        let apy = weighted_apy(&btc_pairs).round_dp(2);
        lines.push(format!("Weighted BTC APY: {apy:.2}%"));
    }

    lines.push(format!("TVL history entries: {}", tvl_entries.len()));
    Ok(lines)
}

async fn run() -> anyhow::Result<Vec<String>> {
    let config = Config::load_or_default().context("loading configuration")?;
    let client = ApiClient::new(config.api).context("building API client")?;
    info!(base_url = client.base_url(), "Running API smoke test");

    let (overview, incentives, tvl) = futures::try_join!(
        client.protocol_overview(),
        client.defi_spring_incentives(),
        client.tvl_data(),
    )
    .context("market-data request failed")?;

    report(&overview, &incentives, &tvl)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sats_dashboard=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            println!("All API checks passed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("API smoke test failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
