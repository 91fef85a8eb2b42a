use crate::error::ConfigError;
use antiforge_envelope::Algorithm;
use std::fmt;

/// Shortest secret accepted by [`CsrfConfig::new`].
pub const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted token lifetime: 366 days.
pub const MAX_TOKEN_TTL: i64 = 366 * 24 * 60 * 60;

/// Settings for [`CsrfService`](crate::CsrfService).
#[derive(Clone)]
pub struct CsrfConfig {
    /// Signing key (at least [`MIN_SECRET_LENGTH`] bytes)
    pub secret: Vec<u8>,

    /// Token time-to-live in seconds
    pub token_ttl: i64,

    /// MAC algorithm for issued and verified tokens
    pub algorithm: Algorithm,
}

impl fmt::Debug for CsrfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsrfConfig")
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .field("token_ttl", &self.token_ttl)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl CsrfConfig {
    /// Create a configuration with a one hour TTL and HMAC-SHA256.
    pub fn new(secret: Vec<u8>) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            secret,
            token_ttl: 3600,
            algorithm: Algorithm::HS256,
        })
    }

    /// Random secret of [`MIN_SECRET_LENGTH`] bytes.
    pub fn generate_secret() -> Vec<u8> {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        (0..MIN_SECRET_LENGTH).map(|_| rng.r#gen()).collect()
    }

    /// Set token TTL
    pub fn with_token_ttl(mut self, ttl_seconds: i64) -> Self {
        self.token_ttl = ttl_seconds;
        self
    }

    /// Set MAC algorithm
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Re-check values that the builders do not guard.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LENGTH,
                actual: self.secret.len(),
            });
        }

        if !(1..=MAX_TOKEN_TTL).contains(&self.token_ttl) {
            return Err(ConfigError::InvalidTtl {
                max: MAX_TOKEN_TTL,
                actual: self.token_ttl,
            });
        }

        Ok(())
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            secret: Self::generate_secret(),
            token_ttl: 3600,
            algorithm: Algorithm::HS256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let secret = CsrfConfig::generate_secret();
        assert_eq!(secret.len(), 32);

        let config = CsrfConfig::new(secret).unwrap();
        assert_eq!(config.token_ttl, 3600);
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CsrfConfig::default()
            .with_token_ttl(7200)
            .with_algorithm(Algorithm::HS512);

        assert_eq!(config.token_ttl, 7200);
        assert_eq!(config.algorithm, Algorithm::HS512);
    }

    #[test]
    fn test_invalid_secret_length() {
        assert_eq!(
            CsrfConfig::new(vec![1, 2, 3]).unwrap_err(),
            ConfigError::SecretTooShort { min: 32, actual: 3 }
        );
    }

    #[test]
    fn test_invalid_ttl() {
        for ttl in [0, -1, MAX_TOKEN_TTL + 1] {
            let config = CsrfConfig::default().with_token_ttl(ttl);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTtl { .. })
            ));
        }
        assert!(CsrfConfig::default().with_token_ttl(MAX_TOKEN_TTL).validate().is_ok());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = CsrfConfig::new(b"a-very-secret-key-of-32-bytes!!!".to_vec()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("<32 bytes>"));
        assert!(!rendered.contains("very-secret"));
    }
}
