//! Log-only notifier for development
//!
//! Nothing leaves the process; each job produces one info line with the
//! masked recipient.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ed_core::domain::entities::NotificationJob;
use ed_core::services::notification::{NotificationError, Notifier};
use ed_shared::mask_email;

/// Notifier that records deliveries in the log
#[derive(Clone, Default)]
pub struct LogNotifier {
    delivered: Arc<AtomicU64>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs handled so far
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, job: &NotificationJob) -> Result<(), NotificationError> {
        let count = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            recipient = %mask_email(&job.recipient_email),
            template = ?job.template,
            count = count,
            event = "notification_logged",
            "Notification not sent, log delivery only"
        );
        Ok(())
    }
}
