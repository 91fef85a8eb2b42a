use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Payload encoding error: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    #[error("Signature encoding error: {0}")]
    SignatureEncoding(#[from] hex::FromHexError),

    /// Raised when the MAC refuses a key. HMAC accepts keys of any length, so
    /// none of the [`Algorithm`](crate::Algorithm) variants produce this; it
    /// applies only to MACs with a fixed key size.
    #[error("Key rejected by MAC")]
    InvalidKey,

    #[error("Signature mismatch")]
    SignatureMismatch,

    #[error("Payload is not in canonical form")]
    NonCanonical,
}

pub type Result<T> = std::result::Result<T, EnvelopeError>;
