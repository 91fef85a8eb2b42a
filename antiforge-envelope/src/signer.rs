use crate::algorithm::Algorithm;
use crate::canonical::CanonicalBytes;
use crate::error::{EnvelopeError, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Serialize, de::DeserializeOwned};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// A signed payload in printable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Lowercase hex MAC tag
    pub signature: String,

    /// Unpadded base64url canonical payload
    pub payload: String,
}

/// True for characters that can appear in [`Sealed::signature`].
pub fn is_signature_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}

/// True for characters that can appear in [`Sealed::payload`].
pub fn is_payload_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Signs and opens envelopes with a borrowed symmetric key.
#[derive(Clone, Copy)]
pub struct Signer<'k> {
    key: &'k [u8],
    algorithm: Algorithm,
}

impl fmt::Debug for Signer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl<'k> Signer<'k> {
    /// Signer using [`Algorithm::HS256`].
    pub fn new(key: &'k [u8]) -> Self {
        Self::with_algorithm(Algorithm::default(), key)
    }

    pub fn with_algorithm(algorithm: Algorithm, key: &'k [u8]) -> Self {
        Self { key, algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Canonicalize `payload`, MAC it and encode both halves.
    pub fn seal<T: Serialize>(&self, payload: &T) -> Result<Sealed> {
        let canonical = CanonicalBytes::new(payload)?;
        let tag = self.mac(canonical.as_bytes())?;

        Ok(Sealed {
            signature: hex::encode(tag),
            payload: URL_SAFE_NO_PAD.encode(canonical.as_bytes()),
        })
    }

    /// Authenticate and decode an envelope produced by [`Signer::seal`].
    ///
    /// The payload is only deserialized once its MAC has been checked, and it
    /// is rejected if re-encoding it does not reproduce the signed bytes.
    pub fn open<T: Serialize + DeserializeOwned>(&self, signature: &str, payload: &str) -> Result<T> {
        if let Some((index, c)) = signature.char_indices().find(|&(_, c)| !is_signature_char(c)) {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index }.into());
        }
        let tag = hex::decode(signature)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload)?;

        self.verify_mac(&bytes, &tag)?;

        let value: T = serde_json::from_slice(&bytes)?;
        if CanonicalBytes::new(&value)?.as_bytes() != bytes.as_slice() {
            return Err(EnvelopeError::NonCanonical);
        }

        Ok(value)
    }

    /// Raw MAC tag over `data`.
    pub fn mac(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.algorithm {
            Algorithm::HS256 => compute::<HmacSha256>(self.key, data),
            Algorithm::HS384 => compute::<HmacSha384>(self.key, data),
            Algorithm::HS512 => compute::<HmacSha512>(self.key, data),
        }
    }

    /// Check `tag` against the MAC of `data` in constant time.
    pub fn verify_mac(&self, data: &[u8], tag: &[u8]) -> Result<()> {
        match self.algorithm {
            Algorithm::HS256 => check::<HmacSha256>(self.key, data, tag),
            Algorithm::HS384 => check::<HmacSha384>(self.key, data, tag),
            Algorithm::HS512 => check::<HmacSha512>(self.key, data, tag),
        }
    }
}

fn keyed<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Result<M> {
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| EnvelopeError::InvalidKey)?;
    mac.update(data);
    Ok(mac)
}

fn compute<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    Ok(keyed::<M>(key, data)?.finalize().into_bytes().to_vec())
}

fn check<M: Mac + KeyInit>(key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
    keyed::<M>(key, data)?
        .verify_slice(tag)
        .map_err(|_| EnvelopeError::SignatureMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const KEY: &[u8] = b"test_secret_key_32_bytes_long!!!";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        body: String,
        count: u32,
    }

    fn note() -> Note {
        Note {
            body: "hello".to_string(),
            count: 7,
        }
    }

    #[test]
    fn test_seal_and_open() {
        let signer = Signer::new(KEY);
        let sealed = signer.seal(&note()).unwrap();

        assert_eq!(sealed.signature.len(), 64);
        assert!(sealed.signature.chars().all(is_signature_char));
        assert!(sealed.payload.chars().all(is_payload_char));

        let opened: Note = signer.open(&sealed.signature, &sealed.payload).unwrap();
        assert_eq!(opened, note());
    }

    #[test]
    fn test_tag_lengths() {
        for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let tag = Signer::with_algorithm(alg, KEY).mac(b"data").unwrap();
            assert_eq!(tag.len(), alg.tag_len());
        }
    }

    #[test]
    fn test_wrong_key() {
        let sealed = Signer::new(KEY).seal(&note()).unwrap();
        let result: Result<Note> = Signer::new(b"another key").open(&sealed.signature, &sealed.payload);
        assert!(matches!(result, Err(EnvelopeError::SignatureMismatch)));
    }

    #[test]
    fn test_wrong_algorithm() {
        let sealed = Signer::new(KEY).seal(&note()).unwrap();
        let result: Result<Note> =
            Signer::with_algorithm(Algorithm::HS512, KEY).open(&sealed.signature, &sealed.payload);
        assert!(matches!(result, Err(EnvelopeError::SignatureMismatch)));
    }

    #[test]
    fn test_uppercase_signature_rejected() {
        let signer = Signer::new(KEY);
        let sealed = signer.seal(&note()).unwrap();
        let upper = sealed.signature.to_uppercase();

        let result: Result<Note> = signer.open(&upper, &sealed.payload);
        assert!(matches!(result, Err(EnvelopeError::SignatureEncoding(_))));
    }

    #[test]
    fn test_bad_payload_encoding() {
        let signer = Signer::new(KEY);
        let sealed = signer.seal(&note()).unwrap();

        let result: Result<Note> = signer.open(&sealed.signature, "not base64!");
        assert!(matches!(result, Err(EnvelopeError::PayloadEncoding(_))));
    }

    #[test]
    fn test_non_canonical_payload_rejected() {
        let signer = Signer::new(KEY);
        // Valid MAC over bytes that are not in canonical key order.
        let bytes = br#"{"count":7,"body":"hello"}"#;
        let signature = hex::encode(signer.mac(bytes).unwrap());
        let payload = URL_SAFE_NO_PAD.encode(bytes);

        let result: Result<Note> = signer.open(&signature, &payload);
        assert!(matches!(result, Err(EnvelopeError::NonCanonical)));
    }

    #[test]
    fn test_verify_mac_rejects_truncated_tag() {
        let signer = Signer::new(KEY);
        let tag = signer.mac(b"data").unwrap();

        assert!(signer.verify_mac(b"data", &tag).is_ok());
        assert!(signer.verify_mac(b"data", &tag[..16]).is_err());
        assert!(signer.verify_mac(b"datA", &tag).is_err());
    }

    #[test]
    fn test_any_key_length_accepted() {
        let long = vec![7u8; 1024];
        for key in [&b""[..], &b"k"[..], &long[..]] {
            for algorithm in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
                let signer = Signer::with_algorithm(algorithm, key);
                let sealed = signer.seal(&note()).unwrap();
                let opened: Note = signer.open(&sealed.signature, &sealed.payload).unwrap();
                assert_eq!(opened, note());
            }
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", Signer::new(KEY));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("test_secret"));
    }
}
