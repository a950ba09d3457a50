//! Domain entities representing core business objects.

pub mod account;
pub mod company;
pub mod notification;
pub mod token;

// Re-export commonly used types
pub use account::{Account, FederatedIdentity, NewAccount, OtpChallenge, Role};
pub use company::{Company, CompanyCategory, CompanyDetails};
pub use notification::{NotificationJob, NotificationTemplate};
pub use token::{Claims, Principal};
