//! Error types for URL signing

use thiserror::Error;

/// Result type for URL signing operations
pub type SignerResult<T> = Result<T, SignerError>;

/// Errors that can occur while building a signer or presigning a URL
#[derive(Error, Debug)]
pub enum SignerError {
    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The storage SDK failed to produce a presigned request
    #[error("Presigning error: {0}")]
    PresignError(String),

    /// The presigned request did not carry a valid absolute URL
    #[error("Invalid presigned URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
