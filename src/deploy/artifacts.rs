//! Compiled contract artifacts as produced by the Cairo build.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sierra class and CASM for one contract.
#[derive(Debug, Clone)]
pub struct ContractArtifacts {
    pub name: String,
    pub sierra_path: PathBuf,
    pub casm_path: PathBuf,
    pub sierra: Value,
    pub casm: Value,
}

impl ContractArtifacts {
    /// Read `{name}.contract_class.json` and `{name}.compiled_contract_class.json` from `dir`.
    pub async fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let sierra_path = dir.join(format!("{name}.contract_class.json"));
        let casm_path = dir.join(format!("{name}.compiled_contract_class.json"));

        let (sierra, casm) = tokio::try_join!(read_json(&sierra_path), read_json(&casm_path))?;
        debug!(contract = name, dir = %dir.display(), "Loaded contract artifacts");

        Ok(Self {
            name: name.to_string(),
            sierra_path,
            casm_path,
            sierra,
            casm,
        })
    }

    /// ABI entries of the Sierra class.
    pub fn abi(&self) -> &[Value] {
        self.sierra
            .get("abi")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Constructor inputs as `(name, type)` pairs, empty when there is no constructor.
    pub fn constructor_inputs(&self) -> Vec<(String, String)> {
        self.abi()
            .iter()
            .find(|entry| entry.get("type").and_then(Value::as_str) == Some("constructor"))
            .and_then(|ctor| ctor.get("inputs"))
            .and_then(Value::as_array)
            .map(|inputs| {
                inputs
                    .iter()
                    .map(|input| {
                        let field = |key| {
                            input
                                .get(key)
                                .and_then(Value::as_str)
                                .unwrap_or_default()
                                .to_string()
                        };
                        (field("name"), field("type"))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

async fn read_json(path: &Path) -> Result<Value> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::artifact(path, e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::artifact(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sats-artifacts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(dir: &Path, file: &str, value: &Value) {
        std::fs::write(dir.join(file), serde_json::to_vec(value).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_load_reads_both_files() {
        let dir = scratch_dir();
        write(
            &dir,
            "sats_VaultManager.contract_class.json",
            &json!({
                "sierra_program": ["0x1"],
                "abi": [
                    { "type": "impl", "name": "VaultImpl" },
                    {
                        "type": "constructor",
                        "name": "constructor",
                        "inputs": [{ "name": "owner", "type": "core::starknet::contract_address::ContractAddress" }]
                    }
                ]
            }),
        );
        write(
            &dir,
            "sats_VaultManager.compiled_contract_class.json",
            &json!({ "prime": "0x800000000000011000000000000000000000000000000000000000000000001" }),
        );

        let artifacts = ContractArtifacts::load(&dir, "sats_VaultManager").await.unwrap();

        assert_eq!(artifacts.name, "sats_VaultManager");
        assert_eq!(artifacts.abi().len(), 2);
        assert_eq!(
            artifacts.constructor_inputs(),
            vec![(
                "owner".to_string(),
                "core::starknet::contract_address::ContractAddress".to_string()
            )]
        );
        assert!(artifacts.casm.get("prime").is_some());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_missing_casm_is_artifact_error() {
        let dir = scratch_dir();
        write(&dir, "vault.contract_class.json", &json!({ "abi": [] }));

        let err = ContractArtifacts::load(&dir, "vault").await.unwrap_err();
        match err {
            Error::Artifact { path, .. } => {
                assert_eq!(path, dir.join("vault.compiled_contract_class.json"))
            }
            other => panic!("unexpected error: {other:?}"),
        }

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_invalid_json_is_artifact_error() {
        let dir = scratch_dir();
        std::fs::write(dir.join("vault.contract_class.json"), b"{ not json").unwrap();
        write(&dir, "vault.compiled_contract_class.json", &json!({}));

        let err = ContractArtifacts::load(&dir, "vault").await.unwrap_err();
        assert!(matches!(err, Error::Artifact { .. }));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_no_constructor() {
        let artifacts = ContractArtifacts {
            name: "plain".to_string(),
            sierra_path: PathBuf::new(),
            casm_path: PathBuf::new(),
            sierra: json!({ "abi": [{ "type": "function", "name": "deposit" }] }),
            casm: json!({}),
        };
        assert!(artifacts.constructor_inputs().is_empty());
    }
}
