use ethers_core::types::SignatureError;
use ethers_providers::{JsonRpcError, Middleware, MiddlewareError, ProviderError, RpcError};
use thiserror::Error;

/// EIP-1193: the wallet does not support the requested method.
pub const UNSUPPORTED_METHOD: i64 = 4200;

/// JSON-RPC 2.0: the method does not exist or is not available.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED: i64 = 4001;

/// EIP-3326: the wallet does not know the requested chain.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// Error codes treated as "unsupported operation" unless configured otherwise.
pub const DEFAULT_UNSUPPORTED_CODES: [i64; 2] = [UNSUPPORTED_METHOD, METHOD_NOT_FOUND];

/// Returns `true` if `err` is a JSON-RPC error response whose code is one of
/// `codes`. Only these errors trigger a raw RPC fallback; anything else
/// (rejections, transport failures, malformed responses) is a genuine failure.
pub fn is_unsupported_operation<E: MiddlewareError>(err: &E, codes: &[i64]) -> bool {
    err.as_error_response().map_or(false, |resp| codes.contains(&resp.code))
}

#[derive(Error, Debug)]
/// Error thrown by [`CompatSigner`](crate::CompatSigner)
pub enum CompatError<M: Middleware> {
    /// Thrown when the standard signer path fails with anything other than an
    /// unsupported operation, or when a pass-through call fails
    #[error("{0}")]
    MiddlewareError(M::Error),

    /// Thrown when the raw RPC fallback itself fails
    #[error("raw `{method}` request failed: {source}")]
    Fallback {
        method: &'static str,
        #[source]
        source: ProviderError,
    },

    /// Thrown when the wallet answers `personal_sign` with something that is
    /// not a 65 byte signature
    #[error(transparent)]
    InvalidSignature(#[from] SignatureError),
}

impl<M: Middleware> CompatError<M> {
    pub(crate) fn fallback(method: &'static str) -> impl FnOnce(ProviderError) -> Self {
        move |source| CompatError::Fallback { method, source }
    }
}

impl<M: Middleware> MiddlewareError for CompatError<M> {
    type Inner = M::Error;

    fn from_err(src: M::Error) -> Self {
        CompatError::MiddlewareError(src)
    }

    fn as_inner(&self) -> Option<&Self::Inner> {
        match self {
            CompatError::MiddlewareError(e) => Some(e),
            _ => None,
        }
    }

    fn as_error_response(&self) -> Option<&JsonRpcError> {
        match self {
            CompatError::MiddlewareError(e) => e.as_error_response(),
            CompatError::Fallback { source, .. } => RpcError::as_error_response(source),
            CompatError::InvalidSignature(_) => None,
        }
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        match self {
            CompatError::MiddlewareError(e) => e.as_serde_error(),
            CompatError::Fallback { source, .. } => RpcError::as_serde_error(source),
            CompatError::InvalidSignature(_) => None,
        }
    }
}

/// The answer a wallet gives for a method it does not implement, produced
/// locally by the void signer.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct UnsupportedOperation(JsonRpcError);

impl UnsupportedOperation {
    pub fn new(method: &str) -> Self {
        Self(JsonRpcError {
            code: UNSUPPORTED_METHOD,
            message: format!("the wallet does not support `{method}`"),
            data: None,
        })
    }
}

impl RpcError for UnsupportedOperation {
    fn as_error_response(&self) -> Option<&JsonRpcError> {
        Some(&self.0)
    }

    fn as_serde_error(&self) -> Option<&serde_json::Error> {
        None
    }
}

impl From<UnsupportedOperation> for ProviderError {
    fn from(src: UnsupportedOperation) -> Self {
        ProviderError::JsonRpcClientError(Box::new(src))
    }
}
