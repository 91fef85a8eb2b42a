//! # Antiforge CSRF
//!
//! Stateless anti-forgery tokens. A token binds a random nonce to an expiry
//! instant, signs the pair with a symmetric key and encodes it as
//! `<hex signature>$<base64url claim>`. Nothing is stored server side: a token
//! is valid exactly when its signature recomputes under the verifying key and
//! it has not expired.
//!
//! ## Features
//!
//! - ✅ **Stateless** - No token store, every call is a pure function
//! - ✅ **Signed Tokens** - HMAC-SHA256 (or SHA384/SHA512) over a canonical claim
//! - ✅ **Key Binding** - Tokens only verify under the key that signed them
//! - ✅ **Closed Errors** - One exhaustively matchable [`CsrfError`]
//!
//! ## Issuing and Verifying
//!
//! ```rust
//! use antiforge_csrf::{issue, verify};
//! use chrono::{Duration, Utc};
//!
//! let key = b"a 32+ byte secret held by the server";
//! let token = issue(key, Utc::now() + Duration::hours(1)).unwrap();
//!
//! let claim = verify(key, &token, Utc::now()).unwrap();
//! assert_eq!(claim.nonce().len(), 64);
//! ```
//!
//! ## Explicit Claims
//!
//! ```rust
//! use antiforge_csrf::{Claim, CsrfError, sign, verify};
//! use chrono::{TimeZone, Utc};
//!
//! let key = b"a 32+ byte secret held by the server";
//! let expires = Utc.with_ymd_and_hms(2019, 1, 1, 1, 0, 0).unwrap();
//!
//! let token = sign(key, &Claim::new("Hey, I'm a nonce!", expires)).unwrap();
//!
//! let before = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
//! assert_eq!(verify(key, &token, before).unwrap().nonce(), "Hey, I'm a nonce!");
//!
//! let after = Utc.with_ymd_and_hms(2019, 1, 2, 0, 0, 0).unwrap();
//! assert!(matches!(verify(key, &token, after), Err(CsrfError::TokenExpired)));
//!
//! assert!(matches!(
//!     sign(key, &Claim::new("", expires)),
//!     Err(CsrfError::NonceInsufficient)
//! ));
//! ```
//!
//! ## Configured Service
//!
//! ```rust
//! use antiforge_csrf::{CsrfConfig, CsrfService};
//!
//! let config = CsrfConfig::new(CsrfConfig::generate_secret())
//!     .unwrap()
//!     .with_token_ttl(900);
//! let csrf = CsrfService::new(config).unwrap();
//!
//! let token = csrf.issue().unwrap();
//! assert!(csrf.verify(&token).is_ok());
//! ```

pub mod claim;
pub mod config;
pub mod error;
pub mod service;
pub mod token;

pub use antiforge_envelope::Algorithm;
pub use claim::{Claim, MIN_NONCE_LENGTH, NONCE_LENGTH, generate_nonce};
pub use config::{CsrfConfig, MAX_TOKEN_TTL, MIN_SECRET_LENGTH};
pub use error::{ConfigError, CsrfError, Result};
pub use service::CsrfService;
pub use token::{SEPARATOR, Token, issue, issue_with, sign, sign_with, verify, verify_with};
