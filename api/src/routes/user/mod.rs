//! User registration and OTP endpoints
//!
//! - `POST /register/basic/without-sso`
//! - `POST /register/basic/with-sso`
//! - `GET /check-email` (secured)
//! - `POST /verification-otp` (secured)
//! - `POST /generate-otp` (secured)

pub mod check_email;
pub mod otp;
pub mod register;

pub use check_email::check_email;
pub use otp::{generate_otp, verification_otp};
pub use register::{register_with_sso, register_without_sso};
