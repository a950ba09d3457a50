//! Domain-specific error types for account and token operations
//!
//! Transport layers never match on individual variants to pick a status code;
//! they read [`ErrorKind`] through `DomainError::kind` and translate it with a
//! lookup table.

use thiserror::Error;

/// Account lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Account not found")]
    AccountNotFound,

    #[error("OTP code has expired")]
    OtpExpired,

    #[error("OTP code does not match")]
    OtpMismatch,

    #[error("Company not found")]
    CompanyNotFound,
}

/// Session token errors
///
/// Every variant is surfaced to callers as an invalid token; the variants only
/// exist so logs can tell the failure modes apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,
}

/// Coarse classification of a failure, used for status mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request conflicts with existing state
    Conflict,
    /// Referenced resource does not exist
    NotFound,
    /// Resource existed but is no longer valid
    Gone,
    /// Request is malformed or does not match expectations
    BadRequest,
    /// Caller could not be authenticated
    Unauthorized,
    /// Failure on our side; the transaction has been rolled back
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Gone => "gone",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Internal => "internal",
        }
    }
}

impl AuthError {
    /// Error kind for status mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateAccount => ErrorKind::Conflict,
            AuthError::AccountNotFound | AuthError::CompanyNotFound => ErrorKind::NotFound,
            AuthError::OtpExpired => ErrorKind::Gone,
            AuthError::OtpMismatch => ErrorKind::BadRequest,
        }
    }
}
