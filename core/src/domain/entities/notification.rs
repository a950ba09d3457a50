//! Outbound notification payloads.

use std::collections::BTreeMap;

use ed_shared::mask_email;
use serde::Serialize;

use super::account::{Account, OtpChallenge};

/// Message templates known to notifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    /// Email carrying a verification code
    OtpVerification,
}

/// A single delivery request, immutable once built
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NotificationJob {
    pub recipient_email: String,
    pub recipient_name: String,
    pub template: NotificationTemplate,
    /// Template variables: `name`, `email`, `otp`
    pub variables: BTreeMap<String, String>,
}

impl NotificationJob {
    /// Builds the OTP email for `account`
    pub fn otp(account: &Account, challenge: &OtpChallenge) -> Self {
        let name = format!("{} {}", account.first_name, account.last_name)
            .trim()
            .to_string();
        let mut variables = BTreeMap::new();
        variables.insert("name".to_string(), name.clone());
        variables.insert("email".to_string(), account.email.clone());
        variables.insert("otp".to_string(), challenge.code.clone());

        Self {
            recipient_email: account.email.clone(),
            recipient_name: name,
            template: NotificationTemplate::OtpVerification,
            variables,
        }
    }

    /// Looks up a template variable
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

impl std::fmt::Debug for NotificationJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationJob")
            .field("recipient", &mask_email(&self.recipient_email))
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
