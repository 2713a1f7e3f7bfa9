//! Error taxonomy shared by every API variant and the session layer.

use thiserror::Error;

/// Standard result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by [`crate::CtbWebApi`] operations and session transitions.
///
/// `register` and `login` errors go straight to callers for display.
/// `get_me` failures are absorbed by the session synchronizer and turned
/// into state transitions rather than left to bubble up unhandled.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login rejected the supplied credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration payload rejected by the backend.
    #[error("invalid registration data")]
    InvalidData,

    /// The backend acknowledged the request but the success payload was
    /// malformed (e.g. a login response without a token field).
    #[error("invalid response from backend: {0}")]
    InvalidResponse(String),

    /// A stored token was rejected on re-validation.
    #[error("stored token rejected by backend")]
    InvalidToken,

    /// The active variant deliberately does not support this operation.
    #[error("{0} is not supported by this api variant")]
    Unimplemented(&'static str),

    /// The failure-injecting stub variant. Every call ends here.
    #[error("broken api variant")]
    Broken,

    /// The request exceeded the configured deadline.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure. Never mapped to a null user: callers must
    /// be able to tell "no session" from "the network is down".
    #[error("network failure: {0}")]
    Network(String),

    /// The backend answered with an unexpected status code.
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Invalid client or variant configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Errors from the persisted cookie jar.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cookie jar io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cookie jar serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
