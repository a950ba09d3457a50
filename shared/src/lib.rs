//! Shared utilities and common types for the EDash server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered loader
//! - Response envelopes
//! - Log masking helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseBackend, DatabaseConfig, Environment,
    JwtConfig, LogFormat, LoggingConfig, MailConfig, MailProvider, OtpConfig,
    PasswordConfig, ServerConfig,
};
pub use types::{DefaultResponse, ErrorResponse};
pub use utils::mask_email;
