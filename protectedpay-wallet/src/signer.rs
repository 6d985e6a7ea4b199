use crate::{
    error::{is_unsupported_operation, CompatError, DEFAULT_UNSUPPORTED_CODES},
    transaction::{RawTransactionParams, TransactionHandle},
};
use async_trait::async_trait;
use ethers_core::{
    types::{
        transaction::{eip2718::TypedTransaction, eip2930::AccessListWithGasUsed},
        Address, BlockId, Bytes, NameOrAddress, Signature, TxHash, U256,
    },
    utils::format_ether,
};
use ethers_providers::{Middleware, PendingTransaction};
use std::convert::TryFrom;
use tracing::{debug, instrument, warn};

/// Balance reported when the balance query fails.
pub const ZERO_BALANCE: &str = "0.00";

#[derive(Clone, Debug)]
/// Middleware that keeps an application's signing calls working on wallets
/// that only implement part of the standard signer interface.
///
/// Every signing call goes to the inner middleware first. If the wallet
/// answers with an "unsupported operation" error (see
/// [`is_unsupported_operation`]), the call is retried once as a raw JSON-RPC
/// request to the wallet: `personal_sign` for messages and
/// `eth_sendTransaction` for transactions. Any other failure, including a
/// user rejection, is returned unchanged.
///
/// # Example
///
/// ```no_run
/// use ethers_core::types::{Address, TransactionRequest};
/// use ethers_providers::{Http, Middleware, Provider};
/// use protectedpay_wallet::CompatSigner;
/// use std::convert::TryFrom;
///
/// # async fn foo() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = Provider::<Http>::try_from("https://evm-rpc-testnet.sei-apis.com")?;
/// let address: Address = "0xAbc1230000000000000000000000000000000789".parse()?;
/// let signer = CompatSigner::new(provider, address);
///
/// let signature = signer.sign_message("hello").await?;
///
/// let tx = TransactionRequest::new()
///     .to("0xdeF4560000000000000000000000000000000123".parse::<Address>()?)
///     .value(100);
/// let handle = signer.submit_transaction(tx, None).await?;
/// let receipt = handle.wait(1).await?;
/// # Ok(())
/// # }
/// ```
pub struct CompatSigner<M> {
    pub(crate) inner: M,
    pub(crate) address: Address,
    pub(crate) unsupported_codes: Vec<i64>,
}

impl<M: Middleware> CompatSigner<M> {
    /// Binds `address` to the inner middleware. No I/O is performed.
    pub fn new(inner: M, address: Address) -> Self {
        Self { inner, address, unsupported_codes: DEFAULT_UNSUPPORTED_CODES.to_vec() }
    }

    /// Replaces the JSON-RPC error codes that trigger the raw RPC fallback.
    #[must_use]
    pub fn with_unsupported_codes(mut self, codes: impl Into<Vec<i64>>) -> Self {
        self.unsupported_codes = codes.into();
        self
    }

    /// The bound address. Always returned as-is, the wallet is never asked.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn unsupported_codes(&self) -> &[i64] {
        &self.unsupported_codes
    }

    /// Returns a signer bound to the same address on top of a different
    /// middleware. The fallback behavior is preserved.
    pub fn connect<N: Middleware>(&self, inner: N) -> CompatSigner<N> {
        CompatSigner {
            inner,
            address: self.address,
            unsupported_codes: self.unsupported_codes.clone(),
        }
    }

    fn is_unsupported(&self, err: &M::Error) -> bool {
        is_unsupported_operation(err, &self.unsupported_codes)
    }

    /// Signs an arbitrary message with the bound account.
    ///
    /// Falls back to `personal_sign` with the hex encoded message and the
    /// lowercase address when the wallet does not support standard message
    /// signing.
    #[instrument(skip(self, message), fields(address = ?self.address))]
    pub async fn sign_message<S: AsRef<[u8]> + Send + Sync>(
        &self,
        message: S,
    ) -> Result<Signature, CompatError<M>> {
        let message = Bytes::from(message.as_ref().to_vec());
        match self.inner.sign(message.clone(), &self.address).await {
            Ok(signature) => Ok(signature),
            Err(err) if self.is_unsupported(&err) => {
                warn!(%err, "message signing unsupported by the wallet, retrying with personal_sign");
                self.personal_sign(message).await
            }
            Err(err) => Err(CompatError::MiddlewareError(err)),
        }
    }

    async fn personal_sign(&self, message: Bytes) -> Result<Signature, CompatError<M>> {
        let account = format!("{:?}", self.address);
        let signature: Bytes = self
            .inner
            .provider()
            .request("personal_sign", (message, account))
            .await
            .map_err(CompatError::fallback("personal_sign"))?;
        Ok(Signature::try_from(signature.as_ref())?)
    }

    /// Submits a transaction from the bound account.
    ///
    /// Falls back to a raw `eth_sendTransaction` when the wallet does not
    /// support standard transaction submission. The fallback always sends
    /// from the bound address and leaves fields the request did not carry to
    /// the wallet.
    #[instrument(skip(self, tx, block), fields(address = ?self.address))]
    pub async fn submit_transaction<T: Into<TypedTransaction> + Send + Sync>(
        &self,
        tx: T,
        block: Option<BlockId>,
    ) -> Result<TransactionHandle<'_, M::Provider>, CompatError<M>> {
        let tx = self.set_tx_from_if_none(&tx.into());

        let hash = match self.inner.send_transaction(tx.clone(), block).await {
            Ok(pending) => *pending,
            Err(err) if self.is_unsupported(&err) => {
                warn!(%err, "transaction submission unsupported by the wallet, retrying with eth_sendTransaction");
                return self.send_raw(&tx).await
            }
            Err(err) => return Err(CompatError::MiddlewareError(err)),
        };

        let from = tx.from().copied().unwrap_or(self.address);
        let mut handle = TransactionHandle::new(hash, from, self.inner.provider());
        handle.to = match tx.to() {
            Some(NameOrAddress::Address(address)) => Some(*address),
            _ => None,
        };
        handle.value = tx.value().copied().unwrap_or_default();
        handle.data = tx.data().cloned().unwrap_or_default();
        handle.chain_id = tx.chain_id().map(|id| U256::from(id.as_u64()));
        handle.nonce = tx.nonce().copied().unwrap_or_default();
        handle.gas = tx.gas().copied().unwrap_or_default();
        handle.gas_price = tx.gas_price().unwrap_or_default();
        Ok(handle)
    }

    async fn send_raw(
        &self,
        tx: &TypedTransaction,
    ) -> Result<TransactionHandle<'_, M::Provider>, CompatError<M>> {
        let to = match tx.to() {
            Some(NameOrAddress::Address(address)) => Some(*address),
            Some(NameOrAddress::Name(ens)) => {
                Some(self.inner.resolve_name(ens).await.map_err(CompatError::MiddlewareError)?)
            }
            None => None,
        };
        let params = RawTransactionParams {
            from: self.address,
            to,
            value: tx.value().copied().unwrap_or_default(),
            data: tx.data().cloned().unwrap_or_default(),
            gas_limit: tx.gas().copied(),
            gas_price: tx.gas_price(),
        };

        let hash: TxHash = self
            .inner
            .provider()
            .request("eth_sendTransaction", [&params])
            .await
            .map_err(CompatError::fallback("eth_sendTransaction"))?;
        debug!(?hash, "submitted transaction with eth_sendTransaction");

        // the transaction is out, a failed lookup must not lose the hash
        let chain_id = match self.inner.get_chainid().await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(?hash, %err, "could not query the chain id of a submitted transaction");
                None
            }
        };

        let mut handle = TransactionHandle::new(hash, self.address, self.inner.provider());
        handle.to = params.to;
        handle.value = params.value;
        handle.data = params.data;
        handle.chain_id = chain_id;
        Ok(handle)
    }

    /// The bound account's native balance in ether units, e.g.
    /// `"1.500000000000000000"`. Never fails: any error is logged and
    /// reported as [`ZERO_BALANCE`].
    pub async fn balance(&self) -> String {
        match self.inner.get_balance(self.address, None).await {
            Ok(wei) => format_ether(wei),
            Err(err) => {
                warn!(address = ?self.address, %err, "balance lookup failed");
                ZERO_BALANCE.to_string()
            }
        }
    }

    fn set_tx_from_if_none(&self, tx: &TypedTransaction) -> TypedTransaction {
        let mut tx = tx.clone();
        if tx.from().is_none() {
            tx.set_from(self.address);
        }
        tx
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<M: Middleware> Middleware for CompatSigner<M> {
    type Error = CompatError<M>;
    type Provider = M::Provider;
    type Inner = M;

    fn inner(&self) -> &M {
        &self.inner
    }

    fn default_sender(&self) -> Option<Address> {
        Some(self.address)
    }

    async fn get_accounts(&self) -> Result<Vec<Address>, Self::Error> {
        Ok(vec![self.address])
    }

    async fn is_signer(&self) -> bool {
        true
    }

    async fn send_transaction<T: Into<TypedTransaction> + Send + Sync>(
        &self,
        tx: T,
        block: Option<BlockId>,
    ) -> Result<PendingTransaction<'_, Self::Provider>, Self::Error> {
        self.submit_transaction(tx, block).await.map(Into::into)
    }

    /// Signs `data` with the bound account. The `from` argument is ignored.
    async fn sign<T: Into<Bytes> + Send + Sync>(
        &self,
        data: T,
        _: &Address,
    ) -> Result<Signature, Self::Error> {
        let data: Bytes = data.into();
        self.sign_message(data).await
    }

    async fn estimate_gas(
        &self,
        tx: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<U256, Self::Error> {
        let tx = self.set_tx_from_if_none(tx);
        self.inner.estimate_gas(&tx, block).await.map_err(CompatError::MiddlewareError)
    }

    async fn create_access_list(
        &self,
        tx: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<AccessListWithGasUsed, Self::Error> {
        let tx = self.set_tx_from_if_none(tx);
        self.inner.create_access_list(&tx, block).await.map_err(CompatError::MiddlewareError)
    }

    async fn call(
        &self,
        tx: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<Bytes, Self::Error> {
        let tx = self.set_tx_from_if_none(tx);
        self.inner.call(&tx, block).await.map_err(CompatError::MiddlewareError)
    }
}
