//! Mail Module
//!
//! Notifier implementations for OTP emails:
//!
//! - **Mailjet**: Production delivery through the Mailjet Send API v3.1
//! - **Log**: Writes a masked summary to the log, for development
//!
//! Recipient addresses are masked in every log line and OTP codes are never
//! logged.

use std::sync::Arc;

use ed_core::services::notification::Notifier;
use ed_shared::config::{MailConfig, MailProvider};

pub mod log_notifier;
pub mod mailjet;

pub use log_notifier::LogNotifier;
pub use mailjet::MailjetNotifier;

use crate::InfrastructureError;


/// Create a notifier based on configuration
///
/// Falls back to the log notifier when Mailjet is selected without
/// credentials.
pub fn create_notifier(config: &MailConfig) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    match config.provider {
        MailProvider::Log => Ok(Arc::new(LogNotifier::new())),
        MailProvider::Mailjet if !config.has_credentials() => {
            tracing::warn!(
                "Mailjet selected but MJ_APIKEY_PUBLIC/MJ_APIKEY_PRIVATE are missing, using log notifier"
            );
            Ok(Arc::new(LogNotifier::new()))
        }
        MailProvider::Mailjet => {
            tracing::info!(sender = %config.sender_email, "Using Mailjet email delivery");
            Ok(Arc::new(MailjetNotifier::new(config.clone())?))
        }
    }
}
