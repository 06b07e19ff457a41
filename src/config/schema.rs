//! Configuration schema definitions.
//!
//! This module defines the project configuration: compiler version, the
//! network map and deployment settings. All types derive Serde traits for
//! deserialization from `deploy.toml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the local development network.
pub const LOCAL_NETWORK: &str = "hardhat";

/// Root configuration for a deployment run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Solidity compiler settings the artifacts were built with.
    pub solidity: SolidityConfig,

    /// Network used when none is given on the command line.
    pub default_network: String,

    /// Network definitions keyed by name.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Where compiled contract artifacts live.
    pub artifacts: ArtifactsConfig,

    /// Transaction confirmation settings.
    pub deploy: DeploySettings,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            LOCAL_NETWORK.to_string(),
            NetworkConfig {
                url: "http://127.0.0.1:8545".to_string(),
                chain_id: Some(1337),
                ..NetworkConfig::default()
            },
        );
        networks.insert(
            "rinkeby".to_string(),
            NetworkConfig {
                url: "https://rinkeby.infura.io/v3/${PROJECT_ID}".to_string(),
                accounts: vec!["0x${PRIVATE_KEY}".to_string()],
                ..NetworkConfig::default()
            },
        );

        Self {
            solidity: SolidityConfig::default(),
            default_network: LOCAL_NETWORK.to_string(),
            networks,
            artifacts: ArtifactsConfig::default(),
            deploy: DeploySettings::default(),
        }
    }
}

/// Compiler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolidityConfig {
    /// Compiler version, e.g. "0.8.4".
    pub version: String,
}

impl Default for SolidityConfig {
    fn default() -> Self {
        Self {
            version: "0.8.4".to_string(),
        }
    }
}

/// A single network entry.
///
/// `url` and `accounts` may reference environment variables as `${NAME}`;
/// they are expanded when the network is selected.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Expected chain ID. When unset, whatever the node reports is accepted.
    pub chain_id: Option<u64>,

    /// Hex-encoded private keys. The first one deploys.
    pub accounts: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Rounds over all providers before a read call gives up.
    pub rpc_attempts: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            failover_urls: Vec::new(),
            chain_id: None,
            accounts: Vec::new(),
            rpc_timeout_secs: 10,
            rpc_attempts: 3,
        }
    }
}

/// Location of compiled contract artifacts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding `<Source>.sol/<Contract>.json` files.
    pub path: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            path: "artifacts".to_string(),
        }
    }
}

/// Deployment transaction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploySettings {
    /// Block confirmations to wait for after each deployment.
    pub confirmations: u64,

    /// Maximum time to wait for a deployment receipt, in seconds.
    pub confirmation_timeout_secs: u64,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            confirmations: 1,
            confirmation_timeout_secs: 120,
        }
    }
}
