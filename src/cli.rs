//! Command-line interface: argument types and command dispatch.

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};

use crate::blockchain::{BlockchainClient, RpcDeployer, Wallet};
use crate::config::{load_or_default, ResolvedNetwork};
use crate::signature;
use crate::{run_deployment, ContractSet, DeployError, ProjectConfig};

#[derive(Debug, Parser)]
#[command(name = "nft-deploy")]
#[command(about = "Deploy the NFT marketplace contracts and check signatures", long_about = None)]
pub struct Cli {
    /// TOML config file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Network to use (config's default_network when omitted)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Debug logging when RUST_LOG is unset
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deploy NFTMarketplace, UITToken721, UITToken1155 and VerifySignature
    Deploy {
        /// Artifacts directory (overrides config)
        #[arg(long)]
        artifacts: Option<PathBuf>,

        /// Write the deployment report as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Sign a message the way VerifySignature expects, with the network's deployer key
    Sign { message: String },
    /// Check a signature, locally or against a deployed VerifySignature
    Verify {
        #[arg(long)]
        signer: Address,

        #[arg(long)]
        message: String,

        /// 65-byte signature, hex
        #[arg(long)]
        signature: String,

        /// Deployed VerifySignature to ask instead of checking locally
        #[arg(long)]
        contract: Option<Address>,
    },
}

/// How a command that ran to completion ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The signature did not verify.
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::FAILURE,
        }
    }
}

/// Execute a parsed command line.
///
/// The network is resolved only by commands that talk to a node or need
/// its deployer key, so a local `verify` works with unset placeholders.
pub async fn run(cli: Cli) -> Result<Outcome, DeployError> {
    let config = load_or_default(cli.config.as_deref())?;
    let network_name = cli.network.as_deref();

    match cli.command {
        Commands::Deploy { artifacts, output } => {
            let network = resolve(&config, network_name)?;
            deploy(&config, &network, artifacts, output).await
        }
        Commands::Sign { message } => {
            let network = resolve(&config, network_name)?;
            let wallet = Wallet::from_private_key(network.deployer_key()?)?;
            let signed = signature::sign_message_hash(&wallet, &message).await?;
            println!("Signer: {}", signed.signer);
            println!("Message hash: {}", signed.message_hash);
            println!("Signature: {}", signed.signature);
            Ok(Outcome::Success)
        }
        Commands::Verify {
            signer,
            message,
            signature: raw,
            contract,
        } => {
            let sig = signature::parse_signature_hex(&raw)?;
            let valid = match contract {
                Some(contract) => {
                    let network = resolve(&config, network_name)?;
                    let client = BlockchainClient::new(&network);
                    client.verify_chain_id().await?;
                    signature::verify_on_chain(client.provider().clone(), contract, signer, &message, sig)
                        .await?
                }
                None => signature::verify(signer, &message, &sig)?,
            };

            println!("Valid: {}", valid);
            Ok(if valid { Outcome::Success } else { Outcome::Rejected })
        }
    }
}

fn resolve(config: &ProjectConfig, name: Option<&str>) -> Result<ResolvedNetwork, DeployError> {
    let network = config.resolve_network(name)?;
    tracing::info!(
        network = %network.name,
        solc = %config.solidity.version,
        "Configuration loaded"
    );
    Ok(network)
}

async fn deploy(
    config: &ProjectConfig,
    network: &ResolvedNetwork,
    artifacts: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<Outcome, DeployError> {
    let artifacts = artifacts.unwrap_or_else(|| PathBuf::from(&config.artifacts.path));
    let contracts = ContractSet::load(&artifacts)?;

    let wallet = Wallet::from_private_key(network.deployer_key()?)?;
    let client = BlockchainClient::new(network);
    let chain_id = client.verify_chain_id().await?;
    let deployer = RpcDeployer::new(client, wallet, network, &config.deploy);

    let mut stdout = std::io::stdout();
    let report = run_deployment(&deployer, &contracts, &network.name, chain_id.0, &mut stdout).await?;

    if let Some(path) = output {
        report.write_json(&path)?;
        tracing::info!(path = %path.display(), "Deployment report written");
    }

    Ok(Outcome::Success)
}
