//! Canonical payload bytes.
//!
//! Payloads are written with `serde_jcs` (RFC 8785 JSON Canonicalization
//! Scheme): object keys sorted, compact separators. The key order comes from
//! the serializer itself, not from `serde_json`'s map type, so it does not
//! change when `serde_json/preserve_order` is enabled anywhere in the build.
//! These are the bytes that get MACed, and the bytes a verifier re-derives
//! from the decoded payload.

use crate::error::Result;
use serde::Serialize;

/// Bytes produced by the canonical JSON encoding.
///
/// The inner buffer is private; [`CanonicalBytes::new`] is the only
/// constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    pub fn new(payload: &impl Serialize) -> Result<Self> {
        Ok(Self(serde_jcs::to_vec(payload)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
