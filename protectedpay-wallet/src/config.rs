use crate::{error::DEFAULT_UNSUPPORTED_CODES, VendorFlag};
use serde::{Deserialize, Serialize};

/// Knobs of the wallet adapter. Every field has a default, so a partial (or
/// empty) JSON object is a valid configuration.
///
/// ```
/// use protectedpay_wallet::{VendorFlag, WalletConfig};
///
/// let config: WalletConfig =
///     serde_json::from_str(r#"{ "voidSignerVendors": ["seiGlobalWallet"] }"#).unwrap();
/// assert_eq!(config.void_signer_vendors, vec![VendorFlag::SeiGlobalWallet]);
/// assert_eq!(config.unsupported_codes, vec![4200, -32601]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WalletConfig {
    /// JSON-RPC error codes that mark a standard signer call as unsupported
    /// and trigger the raw RPC fallback
    pub unsupported_codes: Vec<i64>,

    /// Vendors whose injected provider cannot back a JSON-RPC signer. Wallets
    /// reporting one of these flags get the void signer straight away.
    pub void_signer_vendors: Vec<VendorFlag>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            unsupported_codes: DEFAULT_UNSUPPORTED_CODES.to_vec(),
            void_signer_vendors: Vec::new(),
        }
    }
}

impl WalletConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
