//! Top-level error type for a deployment run.

use thiserror::Error;

use crate::artifacts::ArtifactError;
use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::signature::SignatureError;

/// Any failure that aborts a run. The CLI maps every variant to exit code 1.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// A deployment step failed; later steps were not attempted.
    #[error("Failed to deploy {contract}: {source}")]
    Step {
        contract: String,
        #[source]
        source: BlockchainError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
