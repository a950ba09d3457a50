//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Mailjet Send API v3.1
    Mailjet,
    /// Write messages to the log instead of sending them
    Log,
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Delivery provider
    pub provider: MailProvider,

    /// Mailjet public API key
    #[serde(default)]
    pub api_key: String,

    /// Mailjet private API key
    #[serde(default)]
    pub api_secret: String,

    /// Sender address
    pub sender_email: String,

    /// Sender display name
    pub sender_name: String,

    /// Subject line of OTP messages
    pub otp_subject: String,

    /// Provider-side template rendering OTP messages
    pub otp_template_id: u64,

    /// Provider API base URL
    pub api_base_url: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Log,
            api_key: String::new(),
            api_secret: String::new(),
            sender_email: String::from("no-reply@edash.id"),
            sender_name: String::from("EDash Admin"),
            otp_subject: String::from("Kode Autentikasi EDash"),
            otp_template_id: 6184340,
            api_base_url: String::from("https://api.mailjet.com"),
            request_timeout_secs: 10,
        }
    }
}

impl MailConfig {
    /// Whether provider credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}
