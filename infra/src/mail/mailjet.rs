//! Mailjet Send API v3.1 notifier
//!
//! OTP messages are rendered by a Mailjet-side template; this client only
//! supplies the template id and its variables.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use ed_core::domain::entities::{NotificationJob, NotificationTemplate};
use ed_core::services::notification::{NotificationError, Notifier};
use ed_shared::config::MailConfig;
use serde::{Deserialize, Serialize};

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetAddress<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct MailjetMessage<'a> {
    #[serde(rename = "From")]
    from: MailjetAddress<'a>,
    #[serde(rename = "To")]
    to: Vec<MailjetAddress<'a>>,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "TemplateID")]
    template_id: u64,
    #[serde(rename = "TemplateLanguage")]
    template_language: bool,
    #[serde(rename = "Variables")]
    variables: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetSendBody<'a> {
    messages: Vec<MailjetMessage<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetSendResponse {
    #[serde(default)]
    messages: Vec<MailjetMessageStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetMessageStatus {
    status: String,
}

fn is_success_status(status: u16) -> bool {
    (200..=299).contains(&status)
}

/// Notifier delivering through Mailjet
pub struct MailjetNotifier {
    client: reqwest::Client,
    config: MailConfig,
    send_url: String,
}

impl MailjetNotifier {
    /// Create a Mailjet notifier
    ///
    /// # Errors
    ///
    /// `InfrastructureError::Http` if the HTTP client cannot be built
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("edash-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let send_url = format!("{}/v3.1/send", config.api_base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            config,
            send_url,
        })
    }

    fn template_id(&self, template: NotificationTemplate) -> u64 {
        match template {
            NotificationTemplate::OtpVerification => self.config.otp_template_id,
        }
    }

    fn subject(&self, template: NotificationTemplate) -> &str {
        match template {
            NotificationTemplate::OtpVerification => &self.config.otp_subject,
        }
    }

    /// Request body for `job`
    pub(crate) fn payload(&self, job: &NotificationJob) -> serde_json::Value {
        let body = MailjetSendBody {
            messages: vec![MailjetMessage {
                from: MailjetAddress {
                    email: &self.config.sender_email,
                    name: &self.config.sender_name,
                },
                to: vec![MailjetAddress {
                    email: &job.recipient_email,
                    name: &job.recipient_name,
                }],
                subject: self.subject(job.template),
                template_id: self.template_id(job.template),
                template_language: true,
                variables: &job.variables,
            }],
        };
        serde_json::to_value(body).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for MailjetNotifier {
    async fn send(&self, job: &NotificationJob) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.send_url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&self.payload(job))
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        if !is_success_status(status) {
            return Err(NotificationError::Rejected { status, body });
        }

        // A 200 can still carry per-message failures
        let parsed: MailjetSendResponse = serde_json::from_str(&body).map_err(|e| {
            NotificationError::Transport(format!("Unexpected Mailjet response: {}", e))
        })?;
        if parsed.messages.iter().any(|m| m.status != "success") {
            return Err(NotificationError::Rejected { status, body });
        }

        tracing::debug!(event = "notification_sent", "Mailjet accepted message");
        Ok(())
    }
}
