use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Shortest nonce accepted when signing or verifying.
pub const MIN_NONCE_LENGTH: usize = 16;

/// Length of nonces produced by [`generate_nonce`].
pub const NONCE_LENGTH: usize = 64;

/// The signed payload of a CSRF token: a nonce and its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    nonce: String,
    expires: DateTime<Utc>,
}

impl Claim {
    /// Build a claim from an explicit nonce.
    ///
    /// Short nonces are accepted here but refused by [`sign`](crate::sign).
    pub fn new(nonce: impl Into<String>, expires: DateTime<Utc>) -> Self {
        Self {
            nonce: nonce.into(),
            expires,
        }
    }

    /// Build a claim with a fresh random nonce.
    pub fn generate(expires: DateTime<Utc>) -> Self {
        Self::new(generate_nonce(), expires)
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// Expired means strictly after; a token is still valid at its expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires
    }

    pub fn has_sufficient_nonce(&self) -> bool {
        self.nonce.len() >= MIN_NONCE_LENGTH
    }

    pub fn into_parts(self) -> (String, DateTime<Utc>) {
        (self.nonce, self.expires)
    }
}

/// Random alphanumeric nonce of [`NONCE_LENGTH`] characters.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
