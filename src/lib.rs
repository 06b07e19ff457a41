//! Deployment and signature tooling for the NFT marketplace contracts.
//!
//! # Architecture Overview
//!
//! ```text
//!   deploy.toml / defaults ──▶ config ──▶ ResolvedNetwork
//!                                              │
//!   artifacts/*.json ──▶ artifacts ──┐         ▼
//!                                    ├──▶ deploy ──▶ blockchain ──▶ JSON-RPC node
//!   contracts (ABI) ─────────────────┘         │
//!                                              ▼
//!                                     DeploymentReport
//!
//!   signature: VerifySignature scheme (hash, sign, recover, verify)
//!   cli: argument parsing and command dispatch for the binary
//! ```

pub mod artifacts;
pub mod blockchain;
pub mod cli;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod error;
pub mod observability;
pub mod resilience;
pub mod signature;

pub use config::ProjectConfig;
pub use deploy::{run_deployment, ContractSet, DeploymentReport};
pub use error::DeployError;
