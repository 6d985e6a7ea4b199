//! Network switching for injected wallets (EIP-3326 / EIP-3085).

use crate::error::UNRECOGNIZED_CHAIN;
use ethers_providers::{JsonRpcClient, Middleware, Provider, ProviderError, RpcError};
use protectedpay_chains::{ChainInfo, ChainRegistry, NativeCurrency, Url};
use serde::Serialize;
use tracing::{debug, info};

/// Parameter object of `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<Url>,
    pub block_explorer_urls: Vec<Url>,
}

impl From<&ChainInfo> for AddChainParams {
    fn from(chain: &ChainInfo) -> Self {
        Self {
            chain_id: chain.hex_id(),
            chain_name: chain.name.clone(),
            native_currency: chain.native_currency.clone(),
            rpc_urls: vec![chain.rpc_url.clone()],
            block_explorer_urls: vec![chain.block_explorer_url.clone()],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams {
    chain_id: String,
}

/// What [`switch_chain`] had to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The wallet already knew the chain and switched to it
    Switched,
    /// The wallet did not know the chain and it was added
    Added,
}

/// Asks the wallet to switch to `chain`, adding the chain first if the
/// wallet answers that it does not know it. Any other error, such as the
/// user rejecting the switch, is returned as-is.
pub async fn switch_chain<P: JsonRpcClient>(
    provider: &Provider<P>,
    chain: &ChainInfo,
) -> Result<SwitchOutcome, ProviderError> {
    let params = SwitchChainParams { chain_id: chain.hex_id() };
    match provider.request::<_, serde_json::Value>("wallet_switchEthereumChain", [params]).await {
        Ok(_) => {
            debug!(chain = chain.id, "switched chain");
            Ok(SwitchOutcome::Switched)
        }
        Err(err) if RpcError::as_error_response(&err).map(|e| e.code) == Some(UNRECOGNIZED_CHAIN) => {
            info!(chain = chain.id, name = %chain.name, "wallet does not know the chain, adding it");
            provider
                .request::<_, serde_json::Value>(
                    "wallet_addEthereumChain",
                    [AddChainParams::from(chain)],
                )
                .await?;
            Ok(SwitchOutcome::Added)
        }
        Err(err) => Err(err),
    }
}

/// Looks up the wallet's current chain in `registry`, falling back to the
/// registry's default chain for unknown ids.
pub async fn current_chain<'r, P: JsonRpcClient>(
    provider: &Provider<P>,
    registry: &'r ChainRegistry,
) -> Result<Option<&'r ChainInfo>, ProviderError> {
    let id = provider.get_chainid().await?;
    Ok(registry.resolve(id.low_u64()))
}
