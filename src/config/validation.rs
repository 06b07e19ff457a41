//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default network exists
//! - Validate value ranges (timeouts > 0, url schemes)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProjectConfig → Result<(), Vec<ValidationError>>
//! - Env placeholders are masked, so a config validates without secrets set

use std::fmt;

use crate::config::env::interpolate;
use crate::config::schema::{NetworkConfig, ProjectConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ProjectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_compiler_version(&config.solidity.version) {
        errors.push(ValidationError::new(
            "solidity.version",
            format!("'{}' is not a x.y.z compiler version", config.solidity.version),
        ));
    }

    if config.networks.is_empty() {
        errors.push(ValidationError::new("networks", "at least one network is required"));
    } else if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::new(
            "default_network",
            format!("unknown network '{}'", config.default_network),
        ));
    }

    for (name, network) in &config.networks {
        validate_network(name, network, &mut errors);
    }

    if config.artifacts.path.trim().is_empty() {
        errors.push(ValidationError::new("artifacts.path", "must not be empty"));
    }

    if config.deploy.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "deploy.confirmation_timeout_secs",
            "must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_network(name: &str, network: &NetworkConfig, errors: &mut Vec<ValidationError>) {
    let prefix = format!("networks.{}", name);

    for (field, url) in std::iter::once(("url".to_string(), &network.url)).chain(
        network
            .failover_urls
            .iter()
            .enumerate()
            .map(|(i, url)| (format!("failover_urls[{}]", i), url)),
    ) {
        if let Err(message) = check_rpc_url(url) {
            errors.push(ValidationError::new(format!("{}.{}", prefix, field), message));
        }
    }

    if network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            format!("{}.rpc_timeout_secs", prefix),
            "must be greater than 0",
        ));
    }

    if network.rpc_attempts == 0 {
        errors.push(ValidationError::new(
            format!("{}.rpc_attempts", prefix),
            "must be greater than 0",
        ));
    }

    if network.chain_id == Some(0) {
        errors.push(ValidationError::new(format!("{}.chain_id", prefix), "must not be 0"));
    }
}

fn check_rpc_url(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Err("must not be empty".to_string());
    }

    // Placeholders stand in for secrets that may not be set at validation time.
    let masked = interpolate(raw, |_| Some("placeholder".to_string()))
        .map_err(|name| format!("unresolvable placeholder '{}'", name))?;

    let url = url::Url::parse(&masked).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

fn is_compiler_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
