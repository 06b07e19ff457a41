//! Configuration loading from disk and network resolution.

use std::fs;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::config::env::interpolate_env;
use crate::config::schema::{NetworkConfig, ProjectConfig};
use crate::config::validation::{validate_config, ValidationError};

/// First prefunded account of the local development node.
pub const DEV_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Chain IDs used by local development nodes.
const DEV_CHAIN_IDS: [u64; 2] = [1337, 31337];

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    UnknownNetwork(String),
    MissingEnv { network: String, var: String },
    InvalidUrl { network: String, url: String, reason: String },
    NoAccounts(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::UnknownNetwork(name) => write!(f, "Unknown network '{}'", name),
            ConfigError::MissingEnv { network, var } => write!(
                f,
                "Network '{}' needs environment variable {} which is not set",
                network, var
            ),
            ConfigError::InvalidUrl {
                network,
                url,
                reason,
            } => write!(f, "Network '{}' has invalid URL '{}': {}", network, url, reason),
            ConfigError::NoAccounts(network) => {
                write!(f, "Network '{}' has no accounts configured", network)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load from `path` when given, otherwise use the built-in project defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ProjectConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ProjectConfig::default()),
    }
}

/// A network with all placeholders expanded, ready to connect to.
#[derive(Clone)]
pub struct ResolvedNetwork {
    pub name: String,
    pub url: Url,
    pub failover_urls: Vec<Url>,
    pub chain_id: Option<u64>,
    /// Private keys, hex without `0x`. Never log these.
    accounts: Vec<String>,
    pub rpc_timeout: Duration,
    pub rpc_attempts: u32,
}

impl ResolvedNetwork {
    /// Private key of the deploying account.
    pub fn deployer_key(&self) -> Result<&str, ConfigError> {
        self.accounts
            .first()
            .map(String::as_str)
            .ok_or_else(|| ConfigError::NoAccounts(self.name.clone()))
    }
}

impl std::fmt::Debug for ResolvedNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedNetwork")
            .field("name", &self.name)
            .field("url", &self.url.as_str())
            .field("chain_id", &self.chain_id)
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

impl ProjectConfig {
    /// Select a network by name (or the default one) and expand its
    /// environment placeholders.
    pub fn resolve_network(&self, name: Option<&str>) -> Result<ResolvedNetwork, ConfigError> {
        let name = name.unwrap_or(&self.default_network);
        let network = self
            .networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))?;

        resolve(name, network)
    }
}

fn resolve(name: &str, network: &NetworkConfig) -> Result<ResolvedNetwork, ConfigError> {
    let expand = |value: &str| {
        interpolate_env(value).map_err(|var| ConfigError::MissingEnv {
            network: name.to_string(),
            var,
        })
    };
    let parse = |value: &str| -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            network: name.to_string(),
            url: value.to_string(),
            reason,
        };
        let url = Url::parse(&expand(value)?).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{}', expected http or https", other))),
        }
    };

    let url = parse(&network.url)?;
    let failover_urls = network
        .failover_urls
        .iter()
        .map(|u| parse(u))
        .collect::<Result<Vec<_>, _>>()?;

    let mut accounts = network
        .accounts
        .iter()
        .map(|key| expand(key).map(|k| k.trim_start_matches("0x").to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    if accounts.is_empty() && network.chain_id.is_some_and(|id| DEV_CHAIN_IDS.contains(&id)) {
        tracing::debug!(network = name, "No accounts configured, using development account");
        accounts.push(DEV_PRIVATE_KEY.to_string());
    }

    Ok(ResolvedNetwork {
        name: name.to_string(),
        url,
        failover_urls,
        chain_id: network.chain_id,
        accounts,
        rpc_timeout: Duration::from_secs(network.rpc_timeout_secs),
        rpc_attempts: network.rpc_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_local_network() {
        let config = ProjectConfig::default();
        let network = config.resolve_network(None).unwrap();
        assert_eq!(network.name, "hardhat");
        assert_eq!(network.chain_id, Some(1337));
        assert_eq!(network.url.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(network.deployer_key().unwrap(), DEV_PRIVATE_KEY);
    }

    #[test]
    fn test_unknown_network() {
        let config = ProjectConfig::default();
        let err = config.resolve_network(Some("goerli")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(ref n) if n == "goerli"));
    }

    #[test]
    fn test_missing_env_names_variable() {
        let network = NetworkConfig {
            url: "https://node.example/${NFT_DEPLOY_TEST_UNSET_VAR}".to_string(),
            ..NetworkConfig::default()
        };
        let err = resolve("remote", &network).unwrap_err();
        assert!(err.to_string().contains("NFT_DEPLOY_TEST_UNSET_VAR"));
        assert!(err.to_string().contains("remote"));
    }

    #[test]
    fn test_expanded_url_must_be_http() {
        std::env::set_var("NFT_DEPLOY_TEST_WS_URL", "ws://127.0.0.1:8546");
        let network = NetworkConfig {
            url: "${NFT_DEPLOY_TEST_WS_URL}".to_string(),
            ..NetworkConfig::default()
        };
        let err = resolve("socket", &network).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { ref reason, .. } if reason.contains("ws")));
    }

    #[test]
    fn test_failover_url_must_be_http() {
        std::env::set_var("NFT_DEPLOY_TEST_FAILOVER_URL", "wss://node.example");
        let network = NetworkConfig {
            url: "http://127.0.0.1:8545".to_string(),
            failover_urls: vec!["${NFT_DEPLOY_TEST_FAILOVER_URL}".to_string()],
            ..NetworkConfig::default()
        };
        assert!(matches!(
            resolve("local", &network),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_remote_network_without_accounts() {
        let network = NetworkConfig {
            url: "https://node.example".to_string(),
            chain_id: Some(5),
            ..NetworkConfig::default()
        };
        let resolved = resolve("remote", &network).unwrap();
        assert!(matches!(resolved.deployer_key(), Err(ConfigError::NoAccounts(_))));
    }

    #[test]
    fn test_account_prefix_stripped() {
        let network = NetworkConfig {
            url: "http://localhost:8545".to_string(),
            accounts: vec![format!("0x{}", DEV_PRIVATE_KEY)],
            ..NetworkConfig::default()
        };
        let resolved = resolve("local", &network).unwrap();
        assert_eq!(resolved.deployer_key().unwrap(), DEV_PRIVATE_KEY);
    }

    #[test]
    fn test_parse_config_from_toml() {
        let config = parse_config(
            r#"
            default_network = "anvil"

            [solidity]
            version = "0.8.20"

            [networks.anvil]
            url = "http://127.0.0.1:8545"
            chain_id = 31337
            rpc_timeout_secs = 3

            [deploy]
            confirmations = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.solidity.version, "0.8.20");
        assert_eq!(config.networks.len(), 1);
        assert_eq!(config.deploy.confirmations, 2);
        assert_eq!(config.deploy.confirmation_timeout_secs, 120);

        let network = config.resolve_network(None).unwrap();
        assert_eq!(network.rpc_timeout, Duration::from_secs(3));
        assert_eq!(network.rpc_attempts, 3);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let err = parse_config("default_network = \"nowhere\"").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed"));
    }

    #[test]
    fn test_debug_hides_keys() {
        let network = ProjectConfig::default().resolve_network(None).unwrap();
        let debug = format!("{:?}", network);
        assert!(!debug.contains(DEV_PRIVATE_KEY));
    }
}
