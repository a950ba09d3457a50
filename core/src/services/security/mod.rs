//! Credential and code primitives used by the account services
//!
//! - `clock` - Source of the current time
//! - `otp` - Cryptographically random numeric codes
//! - `password` - bcrypt password hashing

mod clock;
mod otp;
mod password;

pub use clock::{Clock, SystemClock};
pub use otp::OtpGenerator;
pub use password::PasswordHasher;
