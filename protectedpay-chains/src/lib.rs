#![doc = include_str!("../README.md")]
#![deny(unsafe_code, rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use ethers_core::types::Address;
pub use url::Url;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use thiserror::Error;

const CHAINS_JSON: &str = include_str!("./chains/chains.json");

static BUILTIN: Lazy<ChainRegistry> =
    Lazy::new(|| ChainRegistry::from_json(CHAINS_JSON).expect("embedded chain registry is valid"));

/// Errors raised while loading a [`ChainRegistry`]
#[derive(Debug, Error)]
pub enum ChainsError {
    /// Error in underlying lib `serde_json`
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// The registry file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configured fallback id does not name one of the registry's chains
    #[error("fallback chain {0} is not part of the registry")]
    UnknownFallback(u64),

    /// Two entries share a chain id
    #[error("chain {0} is listed more than once")]
    DuplicateChain(u64),
}

/// Native currency of a chain, in the shape wallets expect it (EIP-3085).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A chain the application knows how to talk to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    /// EIP-155 chain id
    pub id: u64,
    /// Human readable chain name
    pub name: String,
    pub native_currency: NativeCurrency,
    pub rpc_url: Url,
    pub block_explorer_url: Url,
    /// Address of the deployed ProtectedPay contract, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Address>,
}

impl ChainInfo {
    /// The chain id as a `0x`-prefixed hex quantity, e.g. `0x1f` for chain 31.
    pub fn hex_id(&self) -> String {
        format!("{:#x}", self.id)
    }
}

/// Set of supported chains plus the chain used when a wallet reports an id
/// that is not part of the set.
///
/// Whether unknown chains fall back at all is configuration: a registry
/// without a `fallback` entry makes [`ChainRegistry::resolve`] as strict as
/// [`ChainRegistry::get`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegistryFile", into = "RegistryFile")]
pub struct ChainRegistry {
    chains: Vec<ChainInfo>,
    fallback: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RegistryFile {
    chains: Vec<ChainInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fallback: Option<u64>,
}

impl TryFrom<RegistryFile> for ChainRegistry {
    type Error = ChainsError;

    fn try_from(file: RegistryFile) -> Result<Self, Self::Error> {
        Self::new(file.chains, file.fallback)
    }
}

impl From<ChainRegistry> for RegistryFile {
    fn from(registry: ChainRegistry) -> Self {
        RegistryFile { chains: registry.chains, fallback: registry.fallback }
    }
}

impl ChainRegistry {
    /// Builds a registry, checking that chain ids are unique and that the
    /// fallback (if any) is one of the chains.
    pub fn new(chains: Vec<ChainInfo>, fallback: Option<u64>) -> Result<Self, ChainsError> {
        let mut seen = HashSet::new();
        for chain in &chains {
            if !seen.insert(chain.id) {
                return Err(ChainsError::DuplicateChain(chain.id))
            }
        }
        if let Some(id) = fallback {
            if !seen.contains(&id) {
                return Err(ChainsError::UnknownFallback(id))
            }
        }
        Ok(Self { chains, fallback })
    }

    /// The registry shipped with the crate: Rootstock testnet and Sei testnet,
    /// falling back to Rootstock testnet.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parses a registry from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, ChainsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a registry from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChainsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Replaces the fallback chain.
    pub fn with_fallback(self, fallback: Option<u64>) -> Result<Self, ChainsError> {
        Self::new(self.chains, fallback)
    }

    pub fn chains(&self) -> &[ChainInfo] {
        &self.chains
    }

    /// The chain used for unknown chain ids.
    pub fn fallback(&self) -> Option<&ChainInfo> {
        self.fallback.and_then(|id| self.get(id))
    }

    /// Returns the chain with the given id, if it is supported.
    pub fn get(&self, id: u64) -> Option<&ChainInfo> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    pub fn is_supported(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Returns the chain with the given id, or the fallback chain if the id is
    /// unknown.
    pub fn resolve(&self, id: u64) -> Option<&ChainInfo> {
        self.get(id).or_else(|| self.fallback())
    }

    pub fn native_currency(&self, id: u64) -> Option<&NativeCurrency> {
        self.resolve(id).map(|chain| &chain.native_currency)
    }

    pub fn explorer_url(&self, id: u64) -> Option<&Url> {
        self.resolve(id).map(|chain| &chain.block_explorer_url)
    }

    /// Address of the ProtectedPay contract for the chain (or its fallback).
    pub fn contract_address(&self, id: u64) -> Option<Address> {
        self.resolve(id).and_then(|chain| chain.contract)
    }
}
