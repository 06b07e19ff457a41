//! Shared utilities for integration tests.

use std::path::Path;
use std::sync::Mutex;

use alloy::primitives::{address, keccak256, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use nft_deploy::blockchain::{
    BlockchainError, BlockchainResult, ContractDeployer, DeployedContract, DeployerAccount,
};
use serde_json::json;

/// Development account address.
#[allow(dead_code)]
pub const DEV_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Deployer that records every creation transaction instead of sending it.
///
/// Addresses follow the CREATE rule for the deployer's nonce, like a fresh
/// account on a local node.
#[allow(dead_code)]
pub struct RecordingDeployer {
    pub address: Address,
    pub balance: U256,
    /// Contract name to fail on.
    pub fail_on: Option<String>,
    pub sent: Mutex<Vec<(String, Bytes)>>,
}

#[allow(dead_code)]
impl RecordingDeployer {
    pub fn new() -> Self {
        Self {
            address: DEV_ADDRESS,
            balance: U256::from(10_000u64) * U256::from(10u64).pow(U256::from(18u64)),
            fail_on: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::new()
        }
    }

    pub fn sent_names(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn sent_code(&self, name: &str) -> Option<Bytes> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| code.clone())
    }
}

#[async_trait]
impl ContractDeployer for RecordingDeployer {
    async fn account(&self) -> BlockchainResult<DeployerAccount> {
        Ok(DeployerAccount {
            address: self.address,
            balance: self.balance,
        })
    }

    async fn deploy(&self, name: &str, creation_code: Bytes) -> BlockchainResult<DeployedContract> {
        if self.fail_on.as_deref() == Some(name) {
            return Err(BlockchainError::Reverted(format!("{} constructor", name)));
        }

        let mut sent = self.sent.lock().unwrap();
        let nonce = sent.len() as u64;
        let tx_hash: TxHash = keccak256(&creation_code);
        sent.push((name.to_string(), creation_code));

        Ok(DeployedContract {
            name: name.to_string(),
            address: self.address.create(nonce),
            tx_hash,
            block_number: Some(nonce + 1),
        })
    }
}

/// Bytecode used for a fake artifact: a short, name-dependent prefix.
#[allow(dead_code)]
pub fn fake_bytecode(name: &str) -> Vec<u8> {
    let mut code = vec![0x60, 0x80, 0x60, 0x40, 0x52];
    code.extend_from_slice(&keccak256(name.as_bytes())[..4]);
    code
}

/// Write a Hardhat-style artifact for `name` under `root`.
#[allow(dead_code)]
pub fn write_artifact(root: &Path, source: &str, name: &str, bytecode: &str) {
    let dir = root.join("contracts").join(format!("{}.sol", source));
    std::fs::create_dir_all(&dir).unwrap();

    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": name,
        "sourceName": format!("contracts/{}.sol", source),
        "abi": [],
        "bytecode": bytecode,
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    std::fs::write(dir.join(format!("{}.json", name)), artifact.to_string()).unwrap();

    let dbg = json!({ "_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc.json" });
    std::fs::write(dir.join(format!("{}.dbg.json", name)), dbg.to_string()).unwrap();
}

/// Write artifacts for all four marketplace contracts.
#[allow(dead_code)]
pub fn write_marketplace_artifacts(root: &Path) {
    for name in ["NFTMarketplace", "UITToken721", "UITToken1155", "VerifySignature"] {
        let code = format!("0x{}", alloy::hex::encode(fake_bytecode(name)));
        write_artifact(root, name, name, &code);
    }
}
