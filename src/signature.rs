//! Off-chain mirror of the `VerifySignature` contract.
//!
//! The contract hashes the message, wraps that hash in the Ethereum signed
//! message prefix, and recovers the signer with `ecrecover`:
//!
//! ```text
//! messageHash        = keccak256(bytes(message))
//! ethSignedHash      = keccak256("\x19Ethereum Signed Message:\n32" ‖ messageHash)
//! verify(s, m, sig)  = ecrecover(ethSignedHash, v, r, s) == s
//! ```
//!
//! A signer produces a matching signature by signing the 32 raw bytes of
//! `messageHash` as a personal message.

use alloy::hex;
use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::providers::DynProvider;
use alloy::signers::Signature;
use serde::Serialize;
use thiserror::Error;

use crate::blockchain::{BlockchainError, Wallet};
use crate::contracts::IVerifySignature;

/// Prefix for a 32-byte personal message.
const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("signature is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Signing(#[from] BlockchainError),

    #[error("VerifySignature call failed: {0}")]
    Contract(String),
}

/// `r`, `s` and `v` of a 65-byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureParts {
    pub r: B256,
    pub s: B256,
    pub v: u8,
}

/// A message with the signature over its hash.
#[derive(Debug, Clone, Serialize)]
pub struct SignedMessage {
    pub message: String,
    pub message_hash: B256,
    pub signature: Bytes,
    pub signer: Address,
}

/// Hash of the message as the contract computes it.
pub fn get_message_hash(message: &str) -> B256 {
    keccak256(message.as_bytes())
}

/// Hash actually signed: the message hash under the personal-message prefix.
pub fn get_eth_signed_message_hash(message_hash: B256) -> B256 {
    let mut buf = [0u8; ETH_SIGNED_MESSAGE_PREFIX.len() + 32];
    buf[..ETH_SIGNED_MESSAGE_PREFIX.len()].copy_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    buf[ETH_SIGNED_MESSAGE_PREFIX.len()..].copy_from_slice(message_hash.as_slice());
    keccak256(buf)
}

/// Split a signature into `r ‖ s ‖ v`.
pub fn split_signature(signature: &[u8]) -> Result<SignatureParts, SignatureError> {
    if signature.len() != 65 {
        return Err(SignatureError::InvalidLength(signature.len()));
    }

    Ok(SignatureParts {
        r: B256::from_slice(&signature[..32]),
        s: B256::from_slice(&signature[32..64]),
        v: signature[64],
    })
}

/// Recover the signer of `eth_signed_hash`.
///
/// `v` must be 27 or 28. Any other `v`, including the raw parity 0/1, or a
/// signature that does not recover, yields `None`, as `ecrecover` yields the
/// zero address.
pub fn recover_signer(
    eth_signed_hash: B256,
    signature: &[u8],
) -> Result<Option<Address>, SignatureError> {
    let parts = split_signature(signature)?;
    let v = parts.v;
    if v != 27 && v != 28 {
        return Ok(None);
    }

    let sig = Signature::new(
        U256::from_be_bytes(parts.r.0),
        U256::from_be_bytes(parts.s.0),
        v == 28,
    );
    Ok(sig.recover_address_from_prehash(&eth_signed_hash).ok())
}

/// Does `signature` over `message` come from `signer`?
pub fn verify(signer: Address, message: &str, signature: &[u8]) -> Result<bool, SignatureError> {
    let eth_signed_hash = get_eth_signed_message_hash(get_message_hash(message));
    let recovered = recover_signer(eth_signed_hash, signature)?;
    Ok(recovered == Some(signer))
}

/// Sign `message` the way `VerifySignature` expects.
pub async fn sign_message_hash(wallet: &Wallet, message: &str) -> Result<SignedMessage, SignatureError> {
    let message_hash = get_message_hash(message);
    let signature = wallet.sign_message(message_hash.as_slice()).await?;

    Ok(SignedMessage {
        message: message.to_string(),
        message_hash,
        signature: Bytes::copy_from_slice(&signature.as_bytes()),
        signer: wallet.address(),
    })
}

/// Parse a hex signature (with or without `0x`).
pub fn parse_signature_hex(raw: &str) -> Result<Bytes, SignatureError> {
    let bytes = hex::decode(raw.trim())?;
    split_signature(&bytes)?;
    Ok(bytes.into())
}

/// Ask a deployed `VerifySignature` contract.
///
/// Also checks that the contract hashes `message` the same way this module
/// does, and logs a warning when it does not.
pub async fn verify_on_chain(
    provider: DynProvider,
    contract: Address,
    signer: Address,
    message: &str,
    signature: Bytes,
) -> Result<bool, SignatureError> {
    let instance = IVerifySignature::new(contract, provider);

    let on_chain_hash = instance
        .getMessageHash(message.to_string())
        .call()
        .await
        .map_err(|e| SignatureError::Contract(e.to_string()))?;
    if on_chain_hash != get_message_hash(message) {
        tracing::warn!(
            contract = %contract,
            on_chain = %on_chain_hash,
            local = %get_message_hash(message),
            "Contract message hash differs from local scheme"
        );
    }

    instance
        .verify(signer, message.to_string(), signature)
        .call()
        .await
        .map_err(|e| SignatureError::Contract(e.to_string()))
}
