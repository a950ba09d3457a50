//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined by `ed_core`:
//!
//! - **Database**: MySQL pool, transaction manager and repositories using SQLx
//! - **Mail**: Mailjet delivery over HTTP and a log-only notifier for development
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use ed_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail module - Notifier implementations
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::storage(error.to_string())
    }
}
