#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Chains ProtectedPay runs on, with their native currencies, endpoints and
/// contract deployments
pub mod chains {
    pub use protectedpay_chains::*;
}

/// Wallet compatibility middleware and network switching
pub mod wallet {
    pub use protectedpay_wallet::*;
}

/// Typed client for the ProtectedPay contract
pub mod contract {
    pub use protectedpay_contract::*;
}

/// Re-exports of the ethers crates the public API is built on
pub mod ethers {
    pub use ethers_core as core;
    pub use ethers_providers as providers;
}

/// Easy imports of frequently used type definitions and traits.
#[doc(hidden)]
pub mod prelude {
    pub use super::chains::{ChainInfo, ChainRegistry, NativeCurrency};
    pub use super::contract::{ContractError, ProtectedPay};
    pub use super::wallet::{
        switch_chain, CompatError, CompatSigner, SwitchOutcome, VendorFlag, WalletAdapter,
        WalletCompatExt, WalletConfig, WalletHandle,
    };
}
