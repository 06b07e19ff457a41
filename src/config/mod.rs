//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! deploy.toml (optional, built-in defaults otherwise)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProjectConfig (validated, immutable)
//!
//! On network selection:
//!     .env + process environment
//!     → env.rs (expand ${NAME} placeholders)
//!     → ResolvedNetwork (urls, chain id, signing keys)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Secrets are only expanded for the network actually used

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, ResolvedNetwork};
pub use schema::{ArtifactsConfig, DeploySettings, NetworkConfig, ProjectConfig, SolidityConfig};
