//! Business services containing domain logic and use cases.

pub mod account;
pub mod company;
pub mod notification;
pub mod security;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, Credentials, Password, RegisterRequest};
pub use company::CompanyService;
pub use notification::{DispatchHandle, NotificationDispatcher, NotificationError, Notifier};
pub use security::{Clock, OtpGenerator, PasswordHasher, SystemClock};
pub use token::{TokenIssuer, TokenIssuerConfig};
