use crate::{
    signer::ZERO_BALANCE, CompatSigner, InjectedSigner, WalletConfig, WalletHandle, WalletProfile,
};
use ethers_core::{types::Address, utils::format_ether};
use ethers_providers::{Middleware, Provider};
use tracing::{debug, warn};

/// The signer a [`WalletAdapter`] hands out.
pub type WalletSigner<P> = CompatSigner<InjectedSigner<P>>;

/// Entry point for an application that received a wallet connection and a
/// connected account.
///
/// The wallet's vendor flags are read once, at construction. Building the
/// adapter performs no I/O.
///
/// ```
/// use ethers_core::types::Address;
/// use ethers_providers::{Middleware, MockProvider};
/// use protectedpay_wallet::{SignerKind, WalletAdapter};
///
/// let address: Address = "0xAbc1230000000000000000000000000000000789".parse().unwrap();
/// let adapter = WalletAdapter::new(MockProvider::new(), address);
///
/// let signer = adapter.signer();
/// assert_eq!(signer.address(), address);
/// assert_eq!(signer.inner().kind(), SignerKind::JsonRpc);
/// ```
#[derive(Clone, Debug)]
pub struct WalletAdapter<P> {
    provider: Provider<P>,
    address: Address,
    profile: WalletProfile,
    config: WalletConfig,
}

impl<P: WalletHandle + Clone> WalletAdapter<P> {
    pub fn new(handle: P, address: Address) -> Self {
        Self::with_config(handle, address, WalletConfig::default())
    }

    pub fn with_config(handle: P, address: Address, config: WalletConfig) -> Self {
        Self::from_provider(Provider::new(handle), address, config)
    }

    /// Builds an adapter on a preconfigured provider, e.g. one with a custom
    /// polling interval.
    pub fn from_provider(provider: Provider<P>, address: Address, config: WalletConfig) -> Self {
        let profile = WalletProfile::detect(provider.as_ref());
        debug!(?address, flags = ?profile.flags(), "wallet adapter created");
        Self { provider, address, profile, config }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &Provider<P> {
        &self.provider
    }

    pub fn profile(&self) -> &WalletProfile {
        &self.profile
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Returns a signer bound to the adapter's account.
    ///
    /// The wallet's own JSON-RPC signer is used when it can be built;
    /// otherwise a void signer takes its place and every signing call goes
    /// through the raw RPC fallback. This never fails.
    pub fn signer(&self) -> WalletSigner<P> {
        let inner = match InjectedSigner::json_rpc(
            self.provider.clone(),
            self.address,
            &self.profile,
            &self.config,
        ) {
            Ok(signer) => signer,
            Err(err) => {
                warn!(%err, "falling back to a void signer");
                InjectedSigner::void(self.provider.clone(), self.address)
            }
        };
        CompatSigner::new(inner, self.address)
            .with_unsupported_codes(self.config.unsupported_codes.clone())
    }

    /// The account's native balance in ether units. Never fails: any error
    /// is logged and reported as `"0.00"`.
    pub async fn balance(&self) -> String {
        match self.provider.get_balance(self.address, None).await {
            Ok(wei) => format_ether(wei),
            Err(err) => {
                warn!(address = ?self.address, %err, "balance lookup failed");
                ZERO_BALANCE.to_string()
            }
        }
    }
}
