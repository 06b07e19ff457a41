//! Contract creation transactions.
//!
//! # Responsibilities
//! - Send a creation transaction signed by the deployer wallet
//! - Wait for the receipt (bounded) and extract the contract address
//! - Report the deployer's account state

use std::future::Future;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, DeployedContract, DeployerAccount,
};
use crate::blockchain::wallet::Wallet;
use crate::config::{DeploySettings, ResolvedNetwork};

/// Something that can put contracts on a chain for one account.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Current state of the deploying account.
    async fn account(&self) -> BlockchainResult<DeployerAccount>;

    /// Deploy `creation_code` (bytecode followed by encoded constructor
    /// arguments) and wait until it is mined.
    async fn deploy(&self, name: &str, creation_code: Bytes) -> BlockchainResult<DeployedContract>;
}

/// Deploys over JSON-RPC with a local signing wallet.
pub struct RpcDeployer {
    client: BlockchainClient,
    wallet: Wallet,
    /// Provider with gas, nonce and chain-id fillers plus the wallet.
    signing_provider: DynProvider,
    confirmations: u64,
    confirmation_timeout: Duration,
}

impl RpcDeployer {
    pub fn new(
        client: BlockchainClient,
        wallet: Wallet,
        network: &ResolvedNetwork,
        settings: &DeploySettings,
    ) -> Self {
        let signing_provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(network.url.clone())
            .erased();

        Self {
            client,
            wallet,
            signing_provider,
            confirmations: settings.confirmations.max(1),
            confirmation_timeout: Duration::from_secs(settings.confirmation_timeout_secs),
        }
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    async fn account(&self) -> BlockchainResult<DeployerAccount> {
        let address = self.wallet.address();
        let balance = self.client.get_balance(address).await?;
        Ok(DeployerAccount { address, balance })
    }

    async fn deploy(&self, name: &str, creation_code: Bytes) -> BlockchainResult<DeployedContract> {
        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_deploy_code(creation_code);

        let pending = self
            .signing_provider
            .send_transaction(tx)
            .await
            .map_err(|e| BlockchainError::Rpc(format!("Failed to send {} deployment: {}", name, e)))?
            .with_required_confirmations(self.confirmations);
        let tx_hash = *pending.tx_hash();

        tracing::info!(contract = name, tx_hash = %tx_hash, "Deployment transaction sent");

        let receipt = await_receipt(self.confirmation_timeout, name, pending.get_receipt()).await?;

        let deployed = contract_from_receipt(
            name,
            tx_hash,
            receipt.status(),
            receipt.contract_address,
            receipt.block_number,
        )?;

        tracing::info!(
            contract = name,
            address = %deployed.address,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            "Contract deployed"
        );

        Ok(deployed)
    }
}

/// Wait at most `limit` for a receipt future.
async fn await_receipt<T, E, F>(limit: Duration, name: &str, receipt: F) -> BlockchainResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    timeout(limit, receipt)
        .await
        .map_err(|_| BlockchainError::Timeout(limit.as_secs()))?
        .map_err(|e| BlockchainError::Rpc(format!("Failed to get {} receipt: {}", name, e)))
}

/// A mined creation transaction must have succeeded and created a contract.
fn contract_from_receipt(
    name: &str,
    tx_hash: TxHash,
    succeeded: bool,
    contract_address: Option<Address>,
    block_number: Option<u64>,
) -> BlockchainResult<DeployedContract> {
    if !succeeded {
        return Err(BlockchainError::Reverted(format!(
            "{} deployment in {}",
            name, tx_hash
        )));
    }

    let address = contract_address.ok_or(BlockchainError::MissingContractAddress(tx_hash))?;

    Ok(DeployedContract {
        name: name.to_string(),
        address,
        tx_hash,
        block_number,
    })
}
