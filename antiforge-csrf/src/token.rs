use crate::claim::Claim;
use crate::error::{CsrfError, Result};
use antiforge_envelope::{Algorithm, Signer};
use antiforge_log::{debug, trace};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Joins the signature and the encoded claim. Never produced by either encoding.
pub const SEPARATOR: char = '$';

/// An opaque signed CSRF token: `<hex signature>$<base64url claim>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl FromStr for Token {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Issue a token for a fresh random nonce, signed with HMAC-SHA256.
pub fn issue(key: &[u8], expires: DateTime<Utc>) -> Result<Token> {
    issue_with(Algorithm::default(), key, expires)
}

pub fn issue_with(algorithm: Algorithm, key: &[u8], expires: DateTime<Utc>) -> Result<Token> {
    sign_with(algorithm, key, &Claim::generate(expires))
}

/// Sign an explicit claim with HMAC-SHA256.
///
/// Fails with [`CsrfError::NonceInsufficient`] before any signing happens if
/// the nonce is shorter than [`MIN_NONCE_LENGTH`](crate::MIN_NONCE_LENGTH).
pub fn sign(key: &[u8], claim: &Claim) -> Result<Token> {
    sign_with(Algorithm::default(), key, claim)
}

pub fn sign_with(algorithm: Algorithm, key: &[u8], claim: &Claim) -> Result<Token> {
    if !claim.has_sufficient_nonce() {
        return Err(CsrfError::NonceInsufficient);
    }

    let sealed = Signer::with_algorithm(algorithm, key)
        .seal(claim)
        .map_err(CsrfError::Signing)?;

    trace!(
        target: "antiforge::csrf",
        "Signed {} CSRF token expiring at {}",
        algorithm,
        claim.expires().to_rfc3339()
    );

    Ok(Token(format!(
        "{}{}{}",
        sealed.signature, SEPARATOR, sealed.payload
    )))
}

/// Verify a token signed with HMAC-SHA256 and return its claim.
///
/// Checks run in order: empty, structure, integrity, expiry, nonce length.
/// Expiry is only looked at once the signature has been authenticated.
pub fn verify(key: &[u8], token: impl AsRef<str>, now: DateTime<Utc>) -> Result<Claim> {
    verify_with(Algorithm::default(), key, token, now)
}

pub fn verify_with(
    algorithm: Algorithm,
    key: &[u8],
    token: impl AsRef<str>,
    now: DateTime<Utc>,
) -> Result<Claim> {
    let result = check(algorithm, key, token.as_ref(), now);
    if let Err(ref e) = result {
        debug!(target: "antiforge::csrf", "Rejected CSRF token: {}", e);
    }
    result
}

fn check(algorithm: Algorithm, key: &[u8], token: &str, now: DateTime<Utc>) -> Result<Claim> {
    if token.is_empty() {
        return Err(CsrfError::TokenEmpty);
    }

    let (signature, payload) = token
        .split_once(SEPARATOR)
        .ok_or(CsrfError::TokenMalformed)?;

    let claim: Claim = Signer::with_algorithm(algorithm, key)
        .open(signature, payload)
        .map_err(|_| CsrfError::TokenInvalid)?;

    if claim.is_expired_at(now) {
        return Err(CsrfError::TokenExpired);
    }

    if !claim.has_sufficient_nonce() {
        return Err(CsrfError::NonceInsufficient);
    }

    Ok(claim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::NONCE_LENGTH;
    use chrono::{Duration, TimeZone};

    const KEY: &[u8] = b"test_secret_key_32_bytes_long!!!";

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, 1, 1, 0, 0).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let claim = Claim::new("Hey, I'm a nonce!", expiry());
        let token = sign(KEY, &claim).unwrap();

        let decoded = verify(KEY, &token, expiry() - Duration::hours(1)).unwrap();
        assert_eq!(decoded, claim);
    }

    #[test]
    fn test_token_shape() {
        let token = sign(KEY, &Claim::new("Hey, I'm a nonce!", expiry())).unwrap();
        let (signature, payload) = token.as_str().split_once(SEPARATOR).unwrap();

        assert_eq!(signature.len(), 64);
        assert!(!payload.is_empty());
        assert!(!payload.contains(SEPARATOR));
        assert_eq!(token.as_str().matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn test_issue() {
        let expires = Utc::now() + Duration::minutes(5);
        let token = issue(KEY, expires).unwrap();

        let claim = verify(KEY, &token, Utc::now()).unwrap();
        assert_eq!(claim.nonce().len(), NONCE_LENGTH);
        assert_eq!(claim.expires(), expires);
    }

    #[test]
    fn test_short_nonce_not_signed() {
        let result = sign(KEY, &Claim::new("Too short.", expiry()));
        assert!(matches!(result, Err(CsrfError::NonceInsufficient)));
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(matches!(verify(KEY, "", expiry()), Err(CsrfError::TokenEmpty)));
        assert!(matches!(
            verify(KEY, "no-separator-here", expiry()),
            Err(CsrfError::TokenMalformed)
        ));
        assert!(matches!(verify(KEY, "$", expiry()), Err(CsrfError::TokenInvalid)));
    }

    #[test]
    fn test_algorithm_is_bound() {
        let claim = Claim::new("Hey, I'm a nonce!", expiry());
        let token = sign_with(Algorithm::HS512, KEY, &claim).unwrap();

        assert!(verify_with(Algorithm::HS512, KEY, &token, expiry()).is_ok());
        assert!(matches!(
            verify(KEY, &token, expiry()),
            Err(CsrfError::TokenInvalid)
        ));
    }

    #[test]
    fn test_token_conversions() {
        let token: Token = "abc$def".parse().unwrap();
        assert_eq!(token.to_string(), "abc$def");
        assert_eq!(String::from(token.clone()), "abc$def");
        assert_eq!(token.as_ref(), "abc$def");
        assert!(!token.is_empty());
        assert!(Token::from(String::new()).is_empty());
    }
}
