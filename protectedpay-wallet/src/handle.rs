use async_trait::async_trait;
use ethers_providers::{Http, JsonRpcClient, MockProvider};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// Vendor identification flags an injected wallet may report about itself
/// (`isMetaMask`, `isSei`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VendorFlag {
    MetaMask,
    CoinbaseWallet,
    Rabby,
    BraveWallet,
    SeiGlobalWallet,
}

/// A connection to the end user's wallet: anything that can carry raw
/// JSON-RPC requests, optionally able to identify its vendor.
pub trait WalletHandle: JsonRpcClient {
    /// Whether the wallet reports the given vendor flag.
    fn reports(&self, _flag: VendorFlag) -> bool {
        false
    }
}

impl WalletHandle for Http {}

impl WalletHandle for MockProvider {}

/// Attaches vendor flags to a transport that cannot report them itself.
///
/// ```
/// use ethers_providers::MockProvider;
/// use protectedpay_wallet::{Flagged, VendorFlag, WalletHandle};
///
/// let handle = Flagged::new(MockProvider::new(), [VendorFlag::SeiGlobalWallet]);
/// assert!(handle.reports(VendorFlag::SeiGlobalWallet));
/// assert!(!handle.reports(VendorFlag::MetaMask));
/// ```
#[derive(Clone, Debug)]
pub struct Flagged<P> {
    inner: P,
    flags: Vec<VendorFlag>,
}

impl<P> Flagged<P> {
    pub fn new(inner: P, flags: impl IntoIterator<Item = VendorFlag>) -> Self {
        Self { inner, flags: flags.into_iter().collect() }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<P: JsonRpcClient> JsonRpcClient for Flagged<P> {
    type Error = P::Error;

    async fn request<T, R>(&self, method: &str, params: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        self.inner.request(method, params).await
    }
}

impl<P: JsonRpcClient> WalletHandle for Flagged<P> {
    fn reports(&self, flag: VendorFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Vendor flags of a wallet, read once when an adapter is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletProfile {
    flags: Vec<VendorFlag>,
}

impl WalletProfile {
    const ALL: [VendorFlag; 5] = [
        VendorFlag::MetaMask,
        VendorFlag::CoinbaseWallet,
        VendorFlag::Rabby,
        VendorFlag::BraveWallet,
        VendorFlag::SeiGlobalWallet,
    ];

    pub fn detect<P: WalletHandle>(handle: &P) -> Self {
        Self { flags: Self::ALL.into_iter().filter(|flag| handle.reports(*flag)).collect() }
    }

    pub fn flags(&self) -> &[VendorFlag] {
        &self.flags
    }

    pub fn is(&self, flag: VendorFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Returns `true` if the wallet reports any of `flags`.
    pub fn matches_any(&self, flags: &[VendorFlag]) -> bool {
        flags.iter().any(|flag| self.is(*flag))
    }
}
