//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, ErrorKind, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// `Storage`, `Hashing`, `Signing` and `Internal` are fatal: the operation that
/// raised them has rolled its transaction back before the error reaches the caller.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage failure: {message}")]
    Storage { message: String },

    #[error("Password hashing failure: {message}")]
    Hashing { message: String },

    #[error("Token signing failure: {message}")]
    Signing { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Error kind for status mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::BadRequest,
            DomainError::Storage { .. }
            | DomainError::Hashing { .. }
            | DomainError::Signing { .. }
            | DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(auth) => auth.kind(),
            DomainError::Token(_) => ErrorKind::Unauthorized,
        }
    }

    /// Shorthand for a storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
