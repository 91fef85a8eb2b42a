//! Fuzz target for CSRF token verification.
//!
//! Feeds arbitrary token strings, keys and clock values to the verifier and
//! checks that it never panics and never accepts a token it did not sign.

#![no_main]

use antiforge_csrf::{Claim, CsrfError, SEPARATOR, sign, verify};
use arbitrary::Arbitrary;
use chrono::{DateTime, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

/// Arbitrary verification input.
#[derive(Debug, Arbitrary)]
struct FuzzToken {
    /// Raw token text
    token: String,
    /// Verification key
    key: Vec<u8>,
    /// Seconds since the epoch for "now"
    now: i32,
    /// Tail spliced onto a genuine signature
    payload: String,
}

fuzz_target!(|data: FuzzToken| {
    let now = Utc.timestamp_opt(i64::from(data.now), 0).single().unwrap_or_else(Utc::now);

    // Arbitrary text must never verify under an arbitrary key.
    if let Ok(claim) = verify(&data.key, &data.token, now) {
        panic!("forged token accepted: {:?}", claim);
    }

    // A genuine signature must not authenticate a different payload.
    let expires: DateTime<Utc> = now + chrono::Duration::hours(1);
    let genuine = match sign(&data.key, &Claim::new("fuzzing nonce value", expires)) {
        Ok(token) => token,
        Err(_) => return,
    };
    let (signature, original) = match genuine.as_str().split_once(SEPARATOR) {
        Some(parts) => parts,
        None => panic!("signed token without separator"),
    };
    if data.payload != original {
        let spliced = format!("{}{}{}", signature, SEPARATOR, data.payload);
        assert!(matches!(verify(&data.key, &spliced, now), Err(CsrfError::TokenInvalid)));
    }
});
