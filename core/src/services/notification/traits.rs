//! Traits for email delivery integration

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::NotificationJob;

/// Delivery failures
///
/// These never reach the caller of an account operation; they are logged by
/// the dispatcher and dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("Delivery task failed: {0}")]
    Task(String),
}

/// Trait for notification delivery backends
///
/// Implementations are called from a background task and must be safe to
/// call concurrently.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Deliver a single job
    async fn send(&self, job: &NotificationJob) -> Result<(), NotificationError>;
}
