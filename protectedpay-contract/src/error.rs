use crate::abi::AbiError;
use ethers_core::{types::TxHash, utils::ConversionError};
use ethers_providers::{Middleware, MiddlewareError, ProviderError};
use protectedpay_chains::ChainRegistry;
use thiserror::Error;

/// EIP-1193: the user rejected the request.
const USER_REJECTED: i64 = 4001;

#[derive(Error, Debug)]
/// Error thrown by [`ProtectedPay`](crate::ProtectedPay)
pub enum ContractError<M: Middleware> {
    /// Thrown when the ABI encoding or decoding fails
    #[error(transparent)]
    AbiError(#[from] AbiError),

    /// Thrown when an ether amount cannot be parsed
    #[error(transparent)]
    ConversionError(#[from] ConversionError),

    /// Thrown when the middleware fails
    #[error("{0}")]
    MiddlewareError(M::Error),

    /// Thrown while waiting for a transaction's confirmations
    #[error(transparent)]
    ProviderError(#[from] ProviderError),

    /// Thrown when a submitted transaction disappears before being mined
    #[error("transaction {0:?} was dropped from the mempool")]
    Dropped(TxHash),

    /// Thrown when neither the chain nor the fallback chain has a deployment
    #[error("no ProtectedPay deployment for chain {0}")]
    NotDeployed(u64),
}

impl<M: Middleware> ContractError<M> {
    /// Returns `true` if the wallet reported that the user rejected the
    /// request.
    pub fn is_user_rejection(&self) -> bool {
        match self {
            ContractError::MiddlewareError(e) => {
                e.as_error_response().map_or(false, |resp| resp.code == USER_REJECTED)
            }
            _ => false,
        }
    }

    /// A message suitable for showing to the end user. `chain_id` selects
    /// the native currency named in "insufficient funds" messages.
    pub fn describe(&self, registry: &ChainRegistry, chain_id: Option<u64>) -> String {
        if self.is_user_rejection() {
            return REJECTED.to_string()
        }
        describe_error(&self.to_string(), registry, chain_id)
    }
}

const REJECTED: &str = "Transaction was rejected by user";

/// Turns a raw error message into one suitable for the end user.
///
/// ```
/// use protectedpay_chains::ChainRegistry;
/// use protectedpay_contract::describe_error;
///
/// let registry = ChainRegistry::builtin();
/// assert_eq!(
///     describe_error("insufficient funds for gas * price + value", registry, Some(1328)),
///     "Insufficient SEI for transaction"
/// );
/// assert_eq!(
///     describe_error("MetaMask Tx Signature: User rejected the transaction", registry, None),
///     "Transaction was rejected by user"
/// );
/// ```
pub fn describe_error(message: &str, registry: &ChainRegistry, chain_id: Option<u64>) -> String {
    let lower = message.to_lowercase();
    if lower.contains("user rejected") || lower.contains("user denied") {
        return REJECTED.to_string()
    }
    if lower.contains("insufficient funds") {
        let symbol = chain_id
            .or_else(|| registry.fallback().map(|chain| chain.id))
            .and_then(|id| registry.native_currency(id))
            .map_or("funds", |currency| currency.symbol.as_str());
        return format!("Insufficient {symbol} for transaction")
    }
    message.to_string()
}
