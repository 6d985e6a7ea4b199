#![doc = include_str!("../README.md")]
#![deny(unsafe_code, rustdoc::broken_intra_doc_links)]

mod abi;
pub use abi::{decode_output, encode_call, AbiError, PROTECTED_PAY_ABI};

mod error;
pub use error::{describe_error, ContractError};

mod types;
pub use types::{
    GroupPayment, GroupPaymentStatus, PotStatus, SavingsPot, Transfer, TransferStatus, UserProfile,
};

mod client;
pub use client::ProtectedPay;
