//! Token module for session JWT management
//!
//! This module handles:
//! - HS256 session token issuance (issuer = application name, subject = email,
//!   audience = role)
//! - Token verification into a typed [`Principal`](crate::domain::entities::Principal)

mod config;
mod service;


pub use config::TokenIssuerConfig;
pub use service::TokenIssuer;
