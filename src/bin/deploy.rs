//! Declare and deploy the vault manager contract.
//!
//! Reads `RPC_ENDPOINT`, `DEPLOYER_ADDRESS` and `DEPLOYER_PRIVATE_KEY` from
//! the environment. Exits 0 after printing the class hash and contract
//! address, 1 on any failure.

use anyhow::Context;
use sats_dashboard::deploy::{DeployEnv, DeployOutcome, ToolkitDeployer, run_deployment};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

async fn run() -> anyhow::Result<DeployOutcome> {
    let env = DeployEnv::from_env().context("reading deployment environment")?;
    let deployer = ToolkitDeployer::new(&env).context("preparing toolkit")?;
    let outcome = run_deployment(&env, &deployer)
        .await
        .with_context(|| format!("deploying {}", env.contract_name))?;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "sats_dashboard=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(outcome) => {
            println!("Class hash: {}", outcome.class_hash);
            println!("Contract address: {}", outcome.contract_address);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Deployment failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
