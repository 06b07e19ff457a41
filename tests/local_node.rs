//! End-to-end run against a local development node.
//!
//! Needs a node on 127.0.0.1:8545 (chain id 1337 or 31337) and compiled
//! artifacts in `NFT_DEPLOY_ARTIFACTS` (default `artifacts`):
//!
//! ```text
//! cargo test --test local_node -- --ignored
//! ```

use std::path::PathBuf;

use nft_deploy::blockchain::{BlockchainClient, RpcDeployer, Wallet};
use nft_deploy::config::{NetworkConfig, ProjectConfig};
use nft_deploy::signature;
use nft_deploy::{run_deployment, ContractSet};

fn local_config() -> ProjectConfig {
    let mut config = ProjectConfig::default();
    let chain_id = std::env::var("NFT_DEPLOY_CHAIN_ID")
        .ok()
        .and_then(|id| id.parse().ok())
        .unwrap_or(31337);
    config.networks.insert(
        "local".to_string(),
        NetworkConfig {
            url: "http://127.0.0.1:8545".to_string(),
            chain_id: Some(chain_id),
            rpc_timeout_secs: 5,
            ..NetworkConfig::default()
        },
    );
    config.default_network = "local".to_string();
    config
}

#[tokio::test]
#[ignore = "requires a local node and compiled artifacts"]
async fn test_deploy_and_verify_on_chain() {
    let config = local_config();
    let network = config.resolve_network(None).unwrap();
    let artifacts = std::env::var("NFT_DEPLOY_ARTIFACTS").unwrap_or_else(|_| "artifacts".into());
    let contracts = ContractSet::load(&PathBuf::from(artifacts)).unwrap();

    let wallet = Wallet::from_private_key(network.deployer_key().unwrap()).unwrap();
    let client = BlockchainClient::new(&network);
    let chain_id = client.verify_chain_id().await.unwrap();
    let deployer = RpcDeployer::new(client.clone(), wallet.clone(), &network, &config.deploy);

    let mut out = Vec::new();
    let report = run_deployment(&deployer, &contracts, &network.name, chain_id.0, &mut out)
        .await
        .unwrap();

    let signed = signature::sign_message_hash(&wallet, "hello").await.unwrap();
    let valid = signature::verify_on_chain(
        client.provider().clone(),
        report.verify_signature.address,
        wallet.address(),
        "hello",
        signed.signature,
    )
    .await
    .unwrap();

    assert!(valid);
}
