use thiserror::Error;

/// Error type for credential digest operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Credential digest failed: {0}")]
    DigestFailed(String),
}
