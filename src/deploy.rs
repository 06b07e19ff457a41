//! Marketplace deployment sequence.
//!
//! ```text
//! deployer account + balance
//!     → NFTMarketplace()
//!     → UITToken721("UITToken721", "U721", marketplace)
//!     → UITToken1155("UITToken1155", "U1155", marketplace)
//!     → VerifySignature()
//!     → report
//! ```
//!
//! Every step waits for the previous one. The first failure aborts the rest.

use std::io::Write;
use std::path::Path;

use alloy::primitives::Address;
use serde::Serialize;

use crate::artifacts::{ArtifactError, ContractFactory};
use crate::blockchain::{ContractDeployer, DeployedContract, DeployerAccount};
use crate::contracts::{
    erc1155_constructor_args, erc721_constructor_args, NFT_MARKETPLACE, UIT_TOKEN_1155,
    UIT_TOKEN_721, VERIFY_SIGNATURE,
};
use crate::error::DeployError;

/// The four contract factories, loaded before anything is sent.
#[derive(Debug, Clone)]
pub struct ContractSet {
    pub marketplace: ContractFactory,
    pub erc721: ContractFactory,
    pub erc1155: ContractFactory,
    pub verify_signature: ContractFactory,
}

impl ContractSet {
    /// Load all four artifacts from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        Ok(Self {
            marketplace: ContractFactory::load(dir, NFT_MARKETPLACE)?,
            erc721: ContractFactory::load(dir, UIT_TOKEN_721)?,
            erc1155: ContractFactory::load(dir, UIT_TOKEN_1155)?,
            verify_signature: ContractFactory::load(dir, VERIFY_SIGNATURE)?,
        })
    }
}

/// What ended up on-chain.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub network: String,
    pub chain_id: u64,
    pub deployer: DeployerAccount,
    pub marketplace: DeployedContract,
    pub erc721: DeployedContract,
    pub erc1155: DeployedContract,
    pub verify_signature: DeployedContract,
}

impl DeploymentReport {
    pub fn marketplace_address(&self) -> Address {
        self.marketplace.address
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), DeployError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Deploy the marketplace and its companion contracts in order.
///
/// Human-readable progress goes to `out`.
pub async fn run_deployment<D, W>(
    deployer: &D,
    contracts: &ContractSet,
    network: &str,
    chain_id: u64,
    out: &mut W,
) -> Result<DeploymentReport, DeployError>
where
    D: ContractDeployer + ?Sized,
    W: Write + Send,
{
    let account = deployer.account().await?;
    writeln!(out, "Deploying contract with account: {}", account.address)?;
    writeln!(out, "Account balance: {}", account.balance)?;

    tracing::info!(
        network,
        chain_id,
        deployer = %account.address,
        balance = %account.balance,
        "Starting deployment"
    );

    let marketplace = deploy_step(deployer, &contracts.marketplace, &[]).await?;

    let erc721 = deploy_step(
        deployer,
        &contracts.erc721,
        &erc721_constructor_args(marketplace.address),
    )
    .await?;

    let erc1155 = deploy_step(
        deployer,
        &contracts.erc1155,
        &erc1155_constructor_args(marketplace.address),
    )
    .await?;

    let verify_signature = deploy_step(deployer, &contracts.verify_signature, &[]).await?;

    writeln!(out, "ERC721: {}", erc721.address)?;
    writeln!(out, "ERC1155: {}", erc1155.address)?;
    writeln!(out, "Contract deployed to: {}", marketplace.address)?;
    writeln!(out, "Verify signature: {}", verify_signature.address)?;

    Ok(DeploymentReport {
        network: network.to_string(),
        chain_id,
        deployer: account,
        marketplace,
        erc721,
        erc1155,
        verify_signature,
    })
}

async fn deploy_step<D>(
    deployer: &D,
    factory: &ContractFactory,
    constructor_args: &[u8],
) -> Result<DeployedContract, DeployError>
where
    D: ContractDeployer + ?Sized,
{
    tracing::debug!(contract = factory.name(), args_len = constructor_args.len(), "Deploying");

    deployer
        .deploy(factory.name(), factory.creation_code(constructor_args))
        .await
        .map_err(|source| DeployError::Step {
            contract: factory.name().to_string(),
            source,
        })
}
