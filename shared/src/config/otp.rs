//! One-time passcode configuration

use serde::{Deserialize, Serialize};

/// OTP issuance and delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    pub length: usize,

    /// Validity window in minutes, identical for every issuance path
    pub validity_minutes: i64,

    /// Upper bound in seconds on waiting for the notification dispatch
    pub dispatch_timeout_secs: u64,

    /// Mint a session token as part of registration
    #[serde(default = "default_issue_session_token")]
    pub issue_session_token: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            length: 6,
            validity_minutes: 10,
            dispatch_timeout_secs: 10,
            issue_session_token: default_issue_session_token(),
        }
    }
}

fn default_issue_session_token() -> bool {
    true
}
