//! Translation of service errors into HTTP responses
//!
//! Status codes come from a single lookup table keyed by [`ErrorKind`]; no
//! handler picks a status for a domain error on its own.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use ed_core::errors::{DomainError, ErrorKind};
use ed_shared::ErrorResponse;
use validator::ValidationErrors;

/// Error kind → HTTP status
const STATUS_TABLE: [(ErrorKind, StatusCode); 6] = [
    (ErrorKind::Conflict, StatusCode::CONFLICT),
    (ErrorKind::NotFound, StatusCode::NOT_FOUND),
    (ErrorKind::Gone, StatusCode::GONE),
    (ErrorKind::BadRequest, StatusCode::BAD_REQUEST),
    (ErrorKind::Unauthorized, StatusCode::UNAUTHORIZED),
    (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
];

/// HTTP status for an error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    STATUS_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, status)| *status)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Status text used in the response envelopes
pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_uppercase()
}

/// Error returned by every handler and by the authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid request data")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(error) => status_for(error.kind()),
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let code = status.as_u16();

        let body = match self {
            ApiError::Validation(errors) => {
                ErrorResponse::with_details(code, status_text(status), errors)
            }
            ApiError::Domain(error) => match error.kind() {
                ErrorKind::Internal => {
                    tracing::error!(error = %error, event = "request_failed", "Internal error");
                    ErrorResponse::new(code, status_text(status), "An internal error occurred")
                }
                ErrorKind::Unauthorized => {
                    tracing::debug!(error = %error, "Token rejected");
                    ErrorResponse::new(code, status_text(status), "Invalid token")
                }
                _ => ErrorResponse::new(code, status_text(status), error.to_string()),
            },
            other => ErrorResponse::new(code, status_text(status), other.to_string()),
        };

        HttpResponse::build(status).json(body)
    }
}
