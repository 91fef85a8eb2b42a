// Antiforge - stateless anti-forgery tokens
//
// A token binds a random nonce and an expiry instant, signed with a
// server-held symmetric key. This crate re-exports the workspace members.

// Re-export the CSRF core at the top level
pub use antiforge_csrf::*;

// Re-export member crates
pub use antiforge_csrf as csrf;
pub use antiforge_envelope as envelope;
pub use antiforge_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Algorithm,
        Claim,
        CsrfConfig,
        CsrfError,
        CsrfService,
        Token,
        issue,
        sign,
        verify,
    };

    pub use antiforge_envelope::{Sealed, Signer};
    pub use chrono::{DateTime, Duration, Utc};
}
