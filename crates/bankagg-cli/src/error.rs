//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client error: {0}")]
    Client(#[from] bankagg_client::ClientError),

    #[error("Not logged in; run `bankagg login` first")]
    NotLoggedIn,

    #[error("This command requires the Admin role")]
    NotAdmin,

    #[error("Invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
