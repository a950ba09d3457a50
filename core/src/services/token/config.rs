//! Configuration for the token issuer

use chrono::Duration;
use ed_shared::config::JwtConfig;

/// Configuration for the token issuer
#[derive(Debug, Clone)]
pub struct TokenIssuerConfig {
    /// Symmetric signing key
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    /// Lifetime of an issued token
    pub validity: Duration,
}

impl Default for TokenIssuerConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenIssuerConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            validity: Duration::hours(config.expiry_hours),
        }
    }
}
