//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedNetwork (urls, chain id, private key)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (read-only RPC with timeouts and failover)
//!     → deployer.rs (creation tx, receipt, contract address)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod deployer;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use deployer::{ContractDeployer, RpcDeployer};
pub use types::{BlockchainError, BlockchainResult, ChainId, DeployedContract, DeployerAccount};
pub use wallet::Wallet;
