//! Declare and deploy through the `starkli` command line.

use super::{ContractArtifacts, DeployEnv, DeployOutcome, DeployRequest, Deployer};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Submits transactions by driving the Starknet toolkit CLI.
///
/// The private key reaches the toolkit through `STARKNET_PRIVATE_KEY` and
/// never appears on the command line.
pub struct ToolkitDeployer {
    program: String,
    base_args: Vec<String>,
    rpc_endpoint: String,
    account_address: String,
    private_key: String,
    account_file: PathBuf,
}

impl ToolkitDeployer {
    pub fn new(env: &DeployEnv) -> Result<Self> {
        let mut words = env.toolkit.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| Error::config("SATS_TOOLKIT is empty"))?;

        Ok(Self {
            program,
            base_args: words.collect(),
            rpc_endpoint: env.rpc_endpoint.clone(),
            account_address: env.deployer_address.clone(),
            private_key: env.deployer_private_key.clone(),
            account_file: crate::config::data_dir()?.join("deployer_account.json"),
        })
    }

    /// Keep the fetched account descriptor somewhere other than the data directory.
    pub fn with_account_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.account_file = path.into();
        self
    }

    pub fn account_file(&self) -> &Path {
        &self.account_file
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(program = %self.program, ?args, "Running toolkit");

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .env("STARKNET_RPC", &self.rpc_endpoint)
            .env("STARKNET_PRIVATE_KEY", &self.private_key)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::deploy(format!("could not run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no output");
            return Err(Error::deploy(format!(
                "{} {} exited with {}: {reason}",
                self.program,
                args.first().copied().unwrap_or_default(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn fetch_account(&self) -> Result<()> {
        if let Some(parent) = self.account_file.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::deploy(format!("could not create {}: {e}", parent.display()))
            })?;
        }
        let account_file = self.account_file.to_string_lossy();
        self.run(&[
            "account",
            "fetch",
            &self.account_address,
            "--rpc",
            &self.rpc_endpoint,
            "--output",
            &account_file,
            "--force",
        ])
        .await?;
        Ok(())
    }

    async fn declare(&self, artifacts: &ContractArtifacts) -> Result<String> {
        let account_file = self.account_file.to_string_lossy();
        let sierra = artifacts.sierra_path.to_string_lossy();
        let casm = artifacts.casm_path.to_string_lossy();
        let stdout = self
            .run(&[
                "declare",
                &sierra,
                "--casm-file",
                &casm,
                "--account",
                &account_file,
                "--rpc",
                &self.rpc_endpoint,
                "--watch",
            ])
            .await?;
        last_felt(&stdout).ok_or_else(|| Error::deploy("declare printed no class hash"))
    }

    async fn deploy(&self, class_hash: &str, request: &DeployRequest) -> Result<String> {
        let account_file = self.account_file.to_string_lossy();
        let mut args: Vec<&str> = vec![
            "deploy",
            class_hash,
            "--salt",
            request.salt.as_str(),
            "--account",
            account_file.as_ref(),
            "--rpc",
            self.rpc_endpoint.as_str(),
            "--watch",
        ];
        args.extend(request.constructor_calldata.iter().map(String::as_str));

        let stdout = self.run(&args).await?;
        last_felt(&stdout).ok_or_else(|| Error::deploy("deploy printed no contract address"))
    }
}

#[async_trait]
impl Deployer for ToolkitDeployer {
    async fn declare_and_deploy(
        &self,
        artifacts: &ContractArtifacts,
        request: &DeployRequest,
    ) -> Result<DeployOutcome> {
        self.fetch_account().await?;
        info!("Account connected");

        let class_hash = self.declare(artifacts).await?;
        info!(%class_hash, "Class declared");

        let contract_address = self.deploy(&class_hash, request).await?;
        Ok(DeployOutcome {
            class_hash,
            contract_address,
        })
    }
}

/// Last `0x…` hex token in the toolkit's output.
fn last_felt(stdout: &str) -> Option<String> {
    stdout
        .split_whitespace()
        .rev()
        .map(|word| word.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
        .find(|word| {
            word.strip_prefix("0x")
                .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
        })
        .map(str::to_string)
}
