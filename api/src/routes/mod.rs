//! Route handlers
//!
//! Handlers validate the request body, call one service operation and wrap
//! the outcome in the response envelope. Errors flow back as [`ApiError`].
//!
//! [`ApiError`]: crate::handlers::ApiError

pub mod company;
pub mod user;

use actix_web::{http::StatusCode, HttpResponse};
use ed_shared::DefaultResponse;
use serde::Serialize;

/// Success envelope carrying `data`
pub(crate) fn respond<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    HttpResponse::build(status).json(DefaultResponse::new(status.as_u16(), reason(status), data))
}

/// Success envelope without data
pub(crate) fn respond_empty(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(DefaultResponse::empty(status.as_u16(), reason(status)))
}

fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}
