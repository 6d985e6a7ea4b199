use ethers_core::{
    types::{Address, Bytes, TransactionReceipt, TxHash, U256},
    utils::to_checksum,
};
use ethers_providers::{JsonRpcClient, PendingTransaction, Provider, ProviderError};
use serde::{Serialize, Serializer};

/// The single parameter object of a raw `eth_sendTransaction` request.
///
/// Optional fields the request did not carry are left out of the JSON object
/// entirely; `value` and `data` are always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionParams {
    #[serde(serialize_with = "checksummed")]
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "checksummed_opt")]
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
}

fn checksummed<S: Serializer>(address: &Address, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&to_checksum(address, None))
}

fn checksummed_opt<S: Serializer>(address: &Option<Address>, s: S) -> Result<S::Ok, S::Error> {
    match address {
        Some(address) => checksummed(address, s),
        None => s.serialize_none(),
    }
}

/// A submitted transaction that may not be mined yet.
///
/// Produced by [`CompatSigner::submit_transaction`](crate::CompatSigner::submit_transaction).
/// When the transaction went out through the raw fallback the wallet only
/// hands back a hash, so `nonce`, `gas` and `gas_price` are zero.
#[derive(Clone, Debug)]
pub struct TransactionHandle<'a, P> {
    pub hash: TxHash,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    /// Chain the transaction was submitted to, when known
    pub chain_id: Option<U256>,
    pub nonce: U256,
    pub gas: U256,
    pub gas_price: U256,
    provider: &'a Provider<P>,
}

impl<'a, P: JsonRpcClient> TransactionHandle<'a, P> {
    pub(crate) fn new(hash: TxHash, from: Address, provider: &'a Provider<P>) -> Self {
        Self {
            hash,
            from,
            to: None,
            value: U256::zero(),
            data: Bytes::default(),
            chain_id: None,
            nonce: U256::zero(),
            gas: U256::zero(),
            gas_price: U256::zero(),
            provider,
        }
    }

    /// Waits until the transaction has `confirmations` confirmations and
    /// returns its receipt. Resolves to `None` if the transaction was dropped
    /// from the mempool.
    pub async fn wait(
        &self,
        confirmations: usize,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        self.pending().confirmations(confirmations).await
    }

    /// The provider's poller for this transaction hash.
    pub fn pending(&self) -> PendingTransaction<'a, P> {
        PendingTransaction::new(self.hash, self.provider)
    }
}

impl<'a, P: JsonRpcClient> From<TransactionHandle<'a, P>> for PendingTransaction<'a, P> {
    fn from(handle: TransactionHandle<'a, P>) -> Self {
        handle.pending()
    }
}
