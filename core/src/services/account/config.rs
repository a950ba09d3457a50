//! Configuration for the account lifecycle service

use std::time::Duration as StdDuration;

use chrono::Duration;
use ed_shared::config::{OtpConfig, PasswordConfig};

use crate::domain::entities::Role;

/// Configuration for the account lifecycle service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Digits per OTP code
    pub otp_length: usize,
    /// Validity window applied on every issuance path
    pub otp_validity: Duration,
    /// Upper bound on waiting for a notification dispatch
    pub dispatch_timeout: StdDuration,
    /// bcrypt work factor
    pub password_cost: u32,
    /// Role given to newly registered accounts
    pub default_role: Role,
    /// Whether registration returns a session token
    pub issue_session_token: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self::from_settings(&OtpConfig::default(), &PasswordConfig::default())
    }
}

impl AccountServiceConfig {
    /// Builds the service configuration from application settings
    pub fn from_settings(otp: &OtpConfig, password: &PasswordConfig) -> Self {
        Self {
            otp_length: otp.length,
            otp_validity: Duration::minutes(otp.validity_minutes),
            dispatch_timeout: StdDuration::from_secs(otp.dispatch_timeout_secs),
            password_cost: password.cost,
            default_role: Role::Admin,
            issue_session_token: otp.issue_session_token,
        }
    }
}
