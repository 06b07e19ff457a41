//! Blockchain RPC client with timeout and failover.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoints
//! - Query chain state (chain id, balances)
//! - Bound every call by a timeout and try failover endpoints in order
//! - Retry read calls in rounds with backoff

use std::future::Future;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::TransportResult;
use tokio::time::{sleep, timeout};

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::ResolvedNetwork;
use crate::resilience::Backoff;

/// Read-only RPC client over a primary endpoint and its failovers.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Primary first, then failovers.
    providers: Vec<DynProvider>,
    network: String,
    expected_chain_id: Option<u64>,
    timeout_duration: Duration,
    attempts: u32,
    backoff: Backoff,
}

impl BlockchainClient {
    /// Create a client for a resolved network. No request is made yet.
    pub fn new(network: &ResolvedNetwork) -> Self {
        let providers = std::iter::once(&network.url)
            .chain(network.failover_urls.iter())
            .map(|url| ProviderBuilder::new().connect_http(url.clone()).erased())
            .collect();

        Self {
            providers,
            network: network.name.clone(),
            expected_chain_id: network.chain_id,
            timeout_duration: network.rpc_timeout,
            attempts: network.rpc_attempts.max(1),
            backoff: Backoff::default(),
        }
    }

    /// Override the retry schedule.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Verify the connected chain ID matches configuration.
    ///
    /// Returns the chain ID reported by the node.
    pub async fn verify_chain_id(&self) -> BlockchainResult<ChainId> {
        let chain_id = self.get_chain_id().await?;
        if let Some(expected) = self.expected_chain_id {
            if chain_id.0 != expected {
                return Err(BlockchainError::ChainMismatch {
                    expected,
                    actual: chain_id.0,
                });
            }
        }

        tracing::info!(network = %self.network, chain_id = chain_id.0, "Connected to chain");
        Ok(chain_id)
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.read("chain id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.read("balance", move |p| async move { p.get_balance(address).await })
            .await
    }

    /// Get the underlying primary provider.
    pub fn provider(&self) -> &DynProvider {
        &self.providers[0]
    }

    /// Run a read call against each provider in turn, for up to
    /// `attempts` rounds.
    async fn read<T, F, Fut>(&self, what: &'static str, call: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        for round in 0..self.attempts {
            if round > 0 {
                let delay = self.backoff.delay(round);
                tracing::debug!(what, round, delay_ms = delay.as_millis() as u64, "Retrying RPC read");
                sleep(delay).await;
            }

            for (i, provider) in self.providers.iter().enumerate() {
                match timeout(self.timeout_duration, call(provider.clone())).await {
                    Ok(Ok(result)) => return Ok(result),
                    Ok(Err(e)) => {
                        tracing::warn!(provider_idx = i, what, error = %e, "RPC error, trying next provider");
                    }
                    Err(_) => {
                        tracing::warn!(provider_idx = i, what, "RPC timeout, trying next provider");
                    }
                }
            }
        }

        Err(BlockchainError::Rpc(format!(
            "All RPC providers failed to get {} on network '{}'",
            what, self.network
        )))
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("network", &self.network)
            .field("providers", &self.providers.len())
            .field("chain_id", &self.expected_chain_id)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}
