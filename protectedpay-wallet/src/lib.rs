#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

mod error;
pub use error::{
    is_unsupported_operation, CompatError, UnsupportedOperation, DEFAULT_UNSUPPORTED_CODES,
    METHOD_NOT_FOUND, UNRECOGNIZED_CHAIN, UNSUPPORTED_METHOD, USER_REJECTED,
};

mod handle;
pub use handle::{Flagged, VendorFlag, WalletHandle, WalletProfile};

mod config;
pub use config::WalletConfig;

mod transaction;
pub use transaction::{RawTransactionParams, TransactionHandle};

/// The wallet's own signer, used as the standard path under [`CompatSigner`]
pub mod injected;
pub use injected::{ConstructionError, InjectedSigner, SignerKind};

/// The [`CompatSigner`] retries signing calls the wallet does not support as
/// raw JSON-RPC requests
pub mod signer;
pub use signer::{CompatSigner, ZERO_BALANCE};

mod adapter;
pub use adapter::{WalletAdapter, WalletSigner};

mod builder;
pub use builder::{WalletBuilder, WalletCompatExt};

pub mod switch;
pub use switch::{switch_chain, AddChainParams, SwitchOutcome};
