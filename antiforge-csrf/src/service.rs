use crate::claim::Claim;
use crate::config::CsrfConfig;
use crate::error::{ConfigError, Result};
use crate::token::{Token, issue_with, verify_with};
use antiforge_log::debug;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Issues and verifies tokens with a configured secret, TTL and algorithm.
#[derive(Debug, Clone)]
pub struct CsrfService {
    config: Arc<CsrfConfig>,
}

impl CsrfService {
    /// Create a new service from a validated configuration
    pub fn new(config: CsrfConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            target: "antiforge::csrf",
            "CSRF service ready (algorithm={}, ttl={}s)",
            config.algorithm,
            config.token_ttl
        );
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Issue a token expiring `token_ttl` seconds from now.
    pub fn issue(&self) -> Result<Token> {
        self.issue_until(Utc::now() + Duration::seconds(self.config.token_ttl))
    }

    /// Issue a token with an explicit expiry.
    pub fn issue_until(&self, expires: DateTime<Utc>) -> Result<Token> {
        issue_with(self.config.algorithm, &self.config.secret, expires)
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: impl AsRef<str>) -> Result<Claim> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: impl AsRef<str>, now: DateTime<Utc>) -> Result<Claim> {
        verify_with(self.config.algorithm, &self.config.secret, token, now)
    }

    pub fn config(&self) -> &CsrfConfig {
        &self.config
    }
}
