//! Account lifecycle module
//!
//! Registration, email lookup, OTP verification and OTP re-issuance. Each
//! operation runs in one transaction; OTP emails are dispatched after the
//! account write and joined before the transaction completes.

mod config;
mod service;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
pub use types::{Credentials, Password, RegisterRequest};
