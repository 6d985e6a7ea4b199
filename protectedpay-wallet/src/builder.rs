use ethers_core::types::Address;
use ethers_providers::Middleware;

use crate::CompatSigner;

/// Composes [`Middleware`](ethers_providers::Middleware) layers around a wallet
/// connection. Adding a layer wraps its predecessor.
///
/// ```rust
/// use ethers_core::types::Address;
/// use ethers_providers::Provider;
/// use protectedpay_wallet::WalletBuilder;
///
/// let (provider, _mock) = Provider::mocked();
/// let address: Address = "0xAbc1230000000000000000000000000000000789".parse().unwrap();
///
/// let signer = WalletBuilder::from(provider)
///     .wallet_compat(address)
///     .build();
/// assert_eq!(signer.address(), address);
/// ```
#[derive(Debug)]
pub struct WalletBuilder<M> {
    inner: M,
}

impl<M> WalletBuilder<M>
where
    M: Middleware,
{
    /// Wraps the current middleware inside a [`CompatSigner`] bound to
    /// `address`.
    pub fn wallet_compat(self, address: Address) -> WalletBuilder<CompatSigner<M>> {
        WalletBuilder::from(CompatSigner::new(self.inner, address))
    }

    /// Wraps the current middleware with the layer returned by `f`.
    pub fn wrap_into<F, T>(self, f: F) -> WalletBuilder<T>
    where
        F: FnOnce(M) -> T,
        T: Middleware,
    {
        WalletBuilder { inner: f(self.inner) }
    }

    /// Returns the outermost layer.
    pub fn build(self) -> M {
        self.inner
    }
}

impl<M> From<M> for WalletBuilder<M>
where
    M: Middleware,
{
    fn from(inner: M) -> Self {
        Self { inner }
    }
}

/// Adds [`CompatSigner`] construction to every middleware.
///
/// ```rust
/// use ethers_core::types::Address;
/// use ethers_providers::Provider;
/// use protectedpay_wallet::WalletCompatExt;
///
/// let (provider, _mock) = Provider::mocked();
/// let signer = provider.wallet_compat(Address::zero());
/// assert_eq!(signer.address(), Address::zero());
/// ```
pub trait WalletCompatExt: Middleware + Sized {
    fn wallet_compat(self, address: Address) -> CompatSigner<Self> {
        CompatSigner::new(self, address)
    }
}

impl<M> WalletCompatExt for M where M: Middleware {}
