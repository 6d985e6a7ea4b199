use ethers_core::{
    abi::{Abi, Detokenize, Function, InvalidOutputType, Tokenize},
    types::Bytes,
};
use once_cell::sync::Lazy;
use thiserror::Error;

const PROTECTED_PAY_JSON: &str = include_str!("./abi/ProtectedPay.json");

/// The ProtectedPay contract ABI.
pub static PROTECTED_PAY_ABI: Lazy<Abi> =
    Lazy::new(|| serde_json::from_str(PROTECTED_PAY_JSON).unwrap());

#[derive(Error, Debug)]
pub enum AbiError {
    /// Thrown when the function is missing from the ABI or the ABI
    /// encoding/decoding fails
    #[error(transparent)]
    DecodingError(#[from] ethers_core::abi::Error),

    /// Thrown when detokenizing a return value
    #[error(transparent)]
    DetokenizationError(#[from] InvalidOutputType),
}

pub(crate) fn function(name: &str) -> Result<&'static Function, AbiError> {
    Ok(PROTECTED_PAY_ABI.function(name)?)
}

/// ABI encodes a call to the contract function `name`.
pub fn encode_call<T: Tokenize>(name: &str, args: T) -> Result<Bytes, AbiError> {
    let tokens = args.into_tokens();
    Ok(function(name)?.encode_input(&tokens).map(Into::into)?)
}

/// Decodes the return data of the contract function `name`.
pub fn decode_output<D: Detokenize>(name: &str, bytes: impl AsRef<[u8]>) -> Result<D, AbiError> {
    let tokens = function(name)?.decode_output(bytes.as_ref())?;
    Ok(D::from_tokens(tokens)?)
}
