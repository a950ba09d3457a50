//! Account projections returned by the lifecycle service.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Account;

/// Result of a successful registration
///
/// Carries basic profile fields and, when enabled, a freshly minted session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResult {
    pub email: String,
    pub first_name: String,
    pub last_name: String,

    /// Session token; absent when registration is configured not to mint one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResult {
    /// Creates a result for `account`
    pub fn new(account: &Account, token: Option<String>) -> Self {
        Self {
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            token,
        }
    }
}

/// Minimal profile projection without credential fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSummary {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
        }
    }
}
