use crate::{error::UnsupportedOperation, VendorFlag, WalletConfig, WalletProfile};
use async_trait::async_trait;
use ethers_core::types::{transaction::eip2718::TypedTransaction, Address, BlockId, Bytes, Signature};
use ethers_providers::{JsonRpcClient, Middleware, PendingTransaction, Provider, ProviderError};
use thiserror::Error;

/// How an [`InjectedSigner`] produces signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignerKind {
    /// Signing and submission go to the wallet via `eth_sign` and
    /// `eth_sendTransaction`
    JsonRpc,
    /// Read-only stand-in; every signing call is answered as unsupported
    Void,
}

#[derive(Error, Debug)]
/// Thrown when the wallet's own JSON-RPC signer cannot be built
pub enum ConstructionError {
    #[error("{0:?} wallets cannot back a JSON-RPC signer")]
    NoJsonRpcSigner(VendorFlag),
}

/// The wallet's own signer, i.e. the "standard path" the compat layer tries
/// first.
///
/// A [`SignerKind::Void`] signer is bound to an address and a provider and
/// can perform every read call, but it cannot sign. Wrapped in a
/// [`CompatSigner`](crate::CompatSigner), its unsupported answers route every
/// signing call to the raw RPC fallback.
#[derive(Clone, Debug)]
pub struct InjectedSigner<P> {
    provider: Provider<P>,
    address: Address,
    kind: SignerKind,
}

impl<P: JsonRpcClient> InjectedSigner<P> {
    /// Builds a signer backed by the wallet's JSON-RPC signing methods.
    /// Fails for wallets whose vendor is listed in
    /// [`WalletConfig::void_signer_vendors`].
    pub fn json_rpc(
        provider: Provider<P>,
        address: Address,
        profile: &WalletProfile,
        config: &WalletConfig,
    ) -> Result<Self, ConstructionError> {
        if let Some(flag) = config.void_signer_vendors.iter().find(|flag| profile.is(**flag)) {
            return Err(ConstructionError::NoJsonRpcSigner(*flag))
        }
        Ok(Self { provider: provider.with_sender(address), address, kind: SignerKind::JsonRpc })
    }

    pub fn void(provider: Provider<P>, address: Address) -> Self {
        Self { provider: provider.with_sender(address), address, kind: SignerKind::Void }
    }

    pub fn kind(&self) -> SignerKind {
        self.kind
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<P: JsonRpcClient> Middleware for InjectedSigner<P> {
    type Error = ProviderError;
    type Provider = P;
    type Inner = Provider<P>;

    fn inner(&self) -> &Provider<P> {
        &self.provider
    }

    fn default_sender(&self) -> Option<Address> {
        Some(self.address)
    }

    async fn is_signer(&self) -> bool {
        self.kind == SignerKind::JsonRpc
    }

    async fn send_transaction<T: Into<TypedTransaction> + Send + Sync>(
        &self,
        tx: T,
        block: Option<BlockId>,
    ) -> Result<PendingTransaction<'_, P>, Self::Error> {
        match self.kind {
            SignerKind::JsonRpc => self.provider.send_transaction(tx, block).await,
            SignerKind::Void => Err(UnsupportedOperation::new("eth_sendTransaction").into()),
        }
    }

    async fn sign<T: Into<Bytes> + Send + Sync>(
        &self,
        data: T,
        from: &Address,
    ) -> Result<Signature, Self::Error> {
        match self.kind {
            SignerKind::JsonRpc => self.provider.sign(data, from).await,
            SignerKind::Void => Err(UnsupportedOperation::new("eth_sign").into()),
        }
    }

    async fn sign_transaction(
        &self,
        tx: &TypedTransaction,
        from: Address,
    ) -> Result<Signature, Self::Error> {
        match self.kind {
            SignerKind::JsonRpc => self.provider.sign_transaction(tx, from).await,
            SignerKind::Void => Err(UnsupportedOperation::new("eth_signTransaction").into()),
        }
    }
}
