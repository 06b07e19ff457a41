//! Compiled contract artifacts.
//!
//! A [`ContractFactory`] binds a contract name to the creation bytecode the
//! Solidity compiler produced for it, read from a Hardhat-style artifact
//! (`artifacts/contracts/<Source>.sol/<Contract>.json`).

use std::path::{Path, PathBuf};

use alloy::hex;
use alloy::primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while loading artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("no artifact for {name} under {}", dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("several artifacts named {name}: {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {} describes {found}, expected {expected}", path.display())]
    NameMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("{0} has no bytecode (interface or abstract contract?)")]
    EmptyBytecode(String),

    #[error("{0} needs library linking, which is not supported")]
    UnlinkedLibrary(String),

    #[error("{name} bytecode is not valid hex: {source}")]
    InvalidHex {
        name: String,
        #[source]
        source: hex::FromHexError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    contract_name: String,
    bytecode: String,
}

/// Creation bytecode for one named contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFactory {
    name: String,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn new(name: impl Into<String>, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            bytecode,
        }
    }

    /// Find `<name>.json` anywhere under `dir` and load it.
    pub fn load(dir: &Path, name: &str) -> Result<Self, ArtifactError> {
        let file_name = format!("{}.json", name);
        let mut matches = Vec::new();

        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ArtifactError::Io {
                        path: dir.to_path_buf(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable artifact path");
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != file_name.as_str() {
                continue;
            }
            let path = entry.into_path();
            // build-info holds compiler input/output, not contract artifacts
            if path.components().any(|c| c.as_os_str() == "build-info") {
                continue;
            }
            matches.push(path);
        }

        match matches.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_string(),
                dir: dir.to_path_buf(),
            }),
            1 => Self::from_file(&matches.remove(0), name),
            _ => {
                matches.sort();
                Err(ArtifactError::Ambiguous {
                    name: name.to_string(),
                    paths: matches,
                })
            }
        }
    }

    /// Load a specific artifact file, checking it describes `name`.
    pub fn from_file(path: &Path, name: &str) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Artifact =
            serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if artifact.contract_name != name {
            return Err(ArtifactError::NameMismatch {
                path: path.to_path_buf(),
                expected: name.to_string(),
                found: artifact.contract_name,
            });
        }

        let bytecode = decode_bytecode(name, &artifact.bytecode)?;
        tracing::debug!(contract = name, path = %path.display(), size = bytecode.len(), "Loaded artifact");

        Ok(Self::new(name, bytecode))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Bytecode followed by ABI-encoded constructor arguments.
    pub fn creation_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + constructor_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(constructor_args);
        code.into()
    }
}

fn decode_bytecode(name: &str, raw: &str) -> Result<Bytes, ArtifactError> {
    let raw = raw.trim();
    if raw.contains("__$") {
        return Err(ArtifactError::UnlinkedLibrary(name.to_string()));
    }

    let bytes = hex::decode(raw).map_err(|source| ArtifactError::InvalidHex {
        name: name.to_string(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ArtifactError::EmptyBytecode(name.to_string()));
    }

    Ok(bytes.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bytecode() {
        let code = decode_bytecode("A", "0x6080604052").unwrap();
        assert_eq!(code.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
        // prefix is optional
        assert_eq!(decode_bytecode("A", "6080").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        assert!(matches!(decode_bytecode("IERC721", "0x"), Err(ArtifactError::EmptyBytecode(_))));
    }

    #[test]
    fn test_unlinked_library_rejected() {
        let raw = "0x6080__$1234567890abcdef1234567890abcdef12$__6040";
        assert!(matches!(decode_bytecode("Market", raw), Err(ArtifactError::UnlinkedLibrary(_))));
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert!(matches!(decode_bytecode("A", "0xzz"), Err(ArtifactError::InvalidHex { .. })));
    }

    #[test]
    fn test_creation_code_appends_args() {
        let factory = ContractFactory::new("A", Bytes::from_static(&[0x60, 0x80]));
        assert_eq!(factory.creation_code(&[]).as_ref(), &[0x60, 0x80]);
        assert_eq!(factory.creation_code(&[0xaa, 0xbb]).as_ref(), &[0x60, 0x80, 0xaa, 0xbb]);
    }
}
