//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token signing and password hashing
//! - `database` - Storage backend and connection pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound email provider
//! - `otp` - One-time passcode issuance and delivery
//! - `server` - HTTP server configuration
//!
//! [`AppConfig::load`] layers, lowest precedence first: compiled defaults,
//! the optional `config/<environment>` file (any format the `config` crate reads), `EDASH_*` variables
//! (`EDASH_AUTH__JWT__SECRET` sets `auth.jwt.secret`) and finally the
//! variable names of the legacy deployment (`APP_NAME`, `JWT_SIGNATURE_KEY`, ...).

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::{DatabaseBackend, DatabaseConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use otp::OtpConfig;
pub use server::ServerConfig;

const ENV_PREFIX: &str = "EDASH";

/// Longest accepted OTP validity window (one day)
pub const MAX_OTP_VALIDITY_MINUTES: i64 = 24 * 60;

/// Longest accepted session token lifetime (one year)
pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 366;

/// Errors raised while assembling configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// OTP configuration
    pub otp: OtpConfig,

    /// Email configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            otp: OtpConfig::default(),
            mail: MailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration for the environment named by `ENVIRONMENT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_for(Environment::from_env())
    }

    /// Load configuration for an explicit environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Self::default()
        };

        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&defaults)?)
            .add_source(::config::File::with_name(&environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt.issuer", env::var("APP_NAME").ok())?
            .set_override_option("auth.jwt.secret", env::var("JWT_SIGNATURE_KEY").ok())?
            .set_override_option("server.port", env::var("APP_PORT").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("mail.api_key", env::var("MJ_APIKEY_PUBLIC").ok())?
            .set_override_option("mail.api_secret", env::var("MJ_APIKEY_PRIVATE").ok())?
            .set_override_option("mail.sender_email", env::var("MJ_EMAIL").ok())?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the services cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.otp.length == 0 {
            return Err(ConfigError::Invalid("otp.length must be positive".to_string()));
        }
        if !(1..=MAX_OTP_VALIDITY_MINUTES).contains(&self.otp.validity_minutes) {
            return Err(ConfigError::Invalid(format!(
                "otp.validity_minutes must be between 1 and {}",
                MAX_OTP_VALIDITY_MINUTES
            )));
        }
        if self.otp.dispatch_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "otp.dispatch_timeout_secs must be positive".to_string(),
            ));
        }
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&self.auth.jwt.expiry_hours) {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt.expiry_hours must be between 1 and {}",
                MAX_JWT_EXPIRY_HOURS
            )));
        }
        if !(4..=31).contains(&self.auth.password.cost) {
            return Err(ConfigError::Invalid(
                "auth.password.cost must be between 4 and 31".to_string(),
            ));
        }
        if self.auth.jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("auth.jwt.secret must not be empty".to_string()));
        }
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "auth.jwt.secret must be set in production".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.otp.validity_minutes, 10);
        assert_eq!(config.auth.jwt.expiry_hours, 24);
    }

    #[test]
    fn test_validate_rejects_bad_cost() {
        let mut config = AppConfig::default();
        config.auth.password.cost = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_bounds_durations() {
        let mut config = AppConfig::default();
        config.otp.validity_minutes = MAX_OTP_VALIDITY_MINUTES;
        config.auth.jwt.expiry_hours = MAX_JWT_EXPIRY_HOURS;
        assert!(config.validate().is_ok());

        let mut config = AppConfig::default();
        config.otp.validity_minutes = i64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.otp.validity_minutes = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.auth.jwt.expiry_hours = i64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.otp.dispatch_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_default_secret_in_production() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        assert!(config.validate().is_err());

        config.auth.jwt = JwtConfig::new("a-real-secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_for_uses_defaults_without_file() {
        let config = AppConfig::load_for(Environment::Staging).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.otp.length, 6);
    }
}
