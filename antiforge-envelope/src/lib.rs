//! # Antiforge Envelope
//!
//! HMAC-signed envelopes for small serde payloads.
//!
//! A payload is encoded canonically ([`CanonicalBytes`]), MACed with a
//! caller-supplied key, and handed back as two printable strings: a lowercase
//! hex signature and an unpadded base64url payload. Opening an envelope checks
//! the MAC in constant time before anything is deserialized.
//!
//! ```rust
//! use antiforge_envelope::Signer;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Invite {
//!     room: String,
//!     seats: u8,
//! }
//!
//! let key = b"an example key that is long enough";
//! let signer = Signer::new(key);
//!
//! let sealed = signer.seal(&Invite { room: "lobby".into(), seats: 4 }).unwrap();
//! let invite: Invite = signer.open(&sealed.signature, &sealed.payload).unwrap();
//! assert_eq!(invite.room, "lobby");
//!
//! assert!(Signer::new(b"other key")
//!     .open::<Invite>(&sealed.signature, &sealed.payload)
//!     .is_err());
//! ```

pub mod algorithm;
pub mod canonical;
pub mod error;
pub mod signer;

pub use algorithm::{Algorithm, UnsupportedAlgorithm};
pub use canonical::CanonicalBytes;
pub use error::{EnvelopeError, Result};
pub use signer::{Sealed, Signer, is_payload_char, is_signature_char};
