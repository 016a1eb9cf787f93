//! Sats dashboard - a terminal UI for the Sats BTC vault.

use anyhow::Context;
use sats_dashboard::{App, Config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// The terminal belongs to the UI, so logs go to a daily file.
fn init_logging() -> anyhow::Result<WorkerGuard> {
    let log_dir = sats_dashboard::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "sats-dashboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sats_dashboard=info".into()))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_logging()?;

    let config = Config::load_or_default().context("loading configuration")?;

    let mut app = App::new(config).await?;
    let result = app.run().await;
    // Restore the terminal before anything is printed.
    drop(app);

    if let Err(e) = &result {
        tracing::error!("Dashboard exited with error: {}", e);
    }
    result.context("running dashboard")
}
