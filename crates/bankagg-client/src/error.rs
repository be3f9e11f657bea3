//! Client error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Bad user input; never reaches the network.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transport or HTTP-status failure for a single attempt. Swallowed
    /// during probing; surfaced only when it is the last attempt.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The login response carried no usable token.
    #[error("Login failed: {0}")]
    Login(String),

    /// Every account endpoint guess and fallback path was exhausted.
    #[error("No matching account found")]
    NoMatchingAccount,

    /// Every transactions endpoint guess was exhausted.
    #[error("No transactions endpoint matched for this user")]
    NoTransactionsEndpoint,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
