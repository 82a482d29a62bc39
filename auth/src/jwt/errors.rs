use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

/// Startup configuration errors. Fatal: the process must not serve traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("No token signing key configured")]
    MissingSigningKey,

    #[error("Token expiration must be positive, got {0} hours")]
    InvalidExpiration(i64),
}
