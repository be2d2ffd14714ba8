use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,
}

impl JwtError {
    /// Whether the error means the presented token must be rejected, as
    /// opposed to a failure of the codec itself.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, JwtError::InvalidToken(_) | JwtError::TokenExpired)
    }
}
