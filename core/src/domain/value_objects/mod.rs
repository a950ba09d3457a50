//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod company_profile;

// Re-export commonly used types
pub use auth_response::{AccountSummary, AuthResult};
pub use company_profile::CompanyProfile;
