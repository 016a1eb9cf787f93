use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CONTRACT_NAME: &str = "sats_VaultManager";
pub const DEFAULT_ARTIFACT_DIR: &str = "target/dev";
pub const DEFAULT_TOOLKIT: &str = "starkli";

/// Deployment settings, read from the environment only.
#[derive(Clone)]
pub struct DeployEnv {
    pub rpc_endpoint: String,
    pub deployer_address: String,
    pub deployer_private_key: String,
    pub contract_name: String,
    pub artifact_dir: PathBuf,
    /// Toolkit command line, e.g. `starkli` or `docker run --rm starkli`.
    pub toolkit: String,
}

impl DeployEnv {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::config(format!("{key} is not set")))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            rpc_endpoint: required("RPC_ENDPOINT")?,
            deployer_address: required("DEPLOYER_ADDRESS")?,
            deployer_private_key: required("DEPLOYER_PRIVATE_KEY")?,
            contract_name: optional("SATS_CONTRACT_NAME", DEFAULT_CONTRACT_NAME),
            artifact_dir: PathBuf::from(optional("SATS_ARTIFACT_DIR", DEFAULT_ARTIFACT_DIR)),
            toolkit: optional("SATS_TOOLKIT", DEFAULT_TOOLKIT),
        })
    }
}

impl fmt::Debug for DeployEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployEnv")
            .field("rpc_endpoint", &self.rpc_endpoint)
            .field("deployer_address", &self.deployer_address)
            .field("deployer_private_key", &"<redacted>")
            .field("contract_name", &self.contract_name)
            .field("artifact_dir", &self.artifact_dir)
            .field("toolkit", &self.toolkit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_for_optional_vars() {
        let env = vars(&[
            ("RPC_ENDPOINT", "http://localhost:5050"),
            ("DEPLOYER_ADDRESS", "0x1"),
            ("DEPLOYER_PRIVATE_KEY", "0x2"),
        ]);
        let deploy = DeployEnv::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(deploy.contract_name, "sats_VaultManager");
        assert_eq!(deploy.artifact_dir, PathBuf::from("target/dev"));
        assert_eq!(deploy.toolkit, "starkli");
    }

    #[test]
    fn test_missing_required_var() {
        let env = vars(&[("RPC_ENDPOINT", "http://localhost:5050"), ("DEPLOYER_ADDRESS", "0x1")]);
        let err = DeployEnv::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: DEPLOYER_PRIVATE_KEY is not set"
        );
    }

    #[test]
    fn test_blank_var_counts_as_missing() {
        let env = vars(&[
            ("RPC_ENDPOINT", "  "),
            ("DEPLOYER_ADDRESS", "0x1"),
            ("DEPLOYER_PRIVATE_KEY", "0x2"),
        ]);
        assert!(DeployEnv::from_lookup(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let env = vars(&[
            ("RPC_ENDPOINT", "http://localhost:5050"),
            ("DEPLOYER_ADDRESS", "0x1"),
            ("DEPLOYER_PRIVATE_KEY", "0xsecret"),
        ]);
        let deploy = DeployEnv::from_lookup(|k| env.get(k).cloned()).unwrap();
        let rendered = format!("{deploy:?}");
        assert!(!rendered.contains("0xsecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
