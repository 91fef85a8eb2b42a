use crate::claim::MIN_NONCE_LENGTH;
use antiforge_envelope::EnvelopeError;
use thiserror::Error;

/// Reasons a CSRF token is refused or cannot be produced.
///
/// Every variant means "reject the action". Integrity failures are reported
/// as [`CsrfError::TokenInvalid`] regardless of their cause.
#[derive(Error, Debug)]
pub enum CsrfError {
    #[error("CSRF token empty")]
    TokenEmpty,

    #[error("CSRF token malformed")]
    TokenMalformed,

    #[error("CSRF token invalid")]
    TokenInvalid,

    #[error("CSRF token expired")]
    TokenExpired,

    #[error("CSRF nonce must be >= {} bytes", MIN_NONCE_LENGTH)]
    NonceInsufficient,

    /// Only produced while signing; verification never returns it.
    #[error("CSRF token signing failed: {0}")]
    Signing(#[source] EnvelopeError),
}

impl CsrfError {
    /// True for the five protocol rejections, false for signing failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, CsrfError::Signing(_))
    }
}

pub type Result<T> = std::result::Result<T, CsrfError>;

/// Invalid [`CsrfConfig`](crate::CsrfConfig) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Secret key must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token TTL must be between 1 and {max} seconds, got {actual}")]
    InvalidTtl { max: i64, actual: i64 },
}
