//! One-shot declare-and-deploy of the vault manager contract.

mod artifacts;
mod env;
mod toolkit;

pub use artifacts::ContractArtifacts;
pub use env::{DEFAULT_ARTIFACT_DIR, DEFAULT_CONTRACT_NAME, DEFAULT_TOOLKIT, DeployEnv};
pub use toolkit::ToolkitDeployer;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Constructor arguments and address salt for a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Felts, already serialized.
    pub constructor_calldata: Vec<String>,
    pub salt: String,
}

impl DeployRequest {
    /// No constructor arguments and a fresh random salt.
    pub fn with_random_salt() -> Self {
        Self {
            constructor_calldata: Vec::new(),
            salt: random_salt(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployOutcome {
    pub class_hash: String,
    pub contract_address: String,
}

/// Something holding an account and a provider that can submit the
/// declare and deploy transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn declare_and_deploy(
        &self,
        artifacts: &ContractArtifacts,
        request: &DeployRequest,
    ) -> Result<DeployOutcome>;
}

/// A random 251-bit felt as `0x`-prefixed hex.
pub fn random_salt() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
    // keep below 2^251
    bytes[0] &= 0x07;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("0x{hex}")
}

/// Load the artifacts named by `env` and hand them to `deployer`.
pub async fn run_deployment(env: &DeployEnv, deployer: &dyn Deployer) -> Result<DeployOutcome> {
    info!(address = %env.deployer_address, rpc = %env.rpc_endpoint, "Deploying {}", env.contract_name);

    let artifacts = ContractArtifacts::load(&env.artifact_dir, &env.contract_name).await?;
    info!(
        constructor_inputs = artifacts.constructor_inputs().len(),
        "Declaring contract"
    );

    let request = DeployRequest::with_random_salt();
    let outcome = deployer.declare_and_deploy(&artifacts, &request).await?;

    info!(
        class_hash = %outcome.class_hash,
        contract_address = %outcome.contract_address,
        "Vault manager deployed"
    );
    Ok(outcome)
}
