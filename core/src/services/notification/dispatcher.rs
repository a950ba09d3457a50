//! Bounded, joinable notification dispatch

use std::sync::Arc;
use std::time::Duration;

use ed_shared::mask_email;
use tokio::task::JoinHandle;

use crate::domain::entities::NotificationJob;

use super::traits::{NotificationError, Notifier};

/// Launches notifier sends on their own task
pub struct NotificationDispatcher<N: Notifier + ?Sized> {
    notifier: Arc<N>,
    timeout: Duration,
}

impl<N: Notifier + ?Sized> Clone for NotificationDispatcher<N> {
    fn clone(&self) -> Self {
        Self {
            notifier: Arc::clone(&self.notifier),
            timeout: self.timeout,
        }
    }
}

impl<N: Notifier + ?Sized> NotificationDispatcher<N> {
    /// Create a dispatcher that gives each send at most `timeout`
    pub fn new(notifier: Arc<N>, timeout: Duration) -> Self {
        Self { notifier, timeout }
    }

    /// Start delivering `job` in the background
    ///
    /// The job is moved into the task and dropped once the attempt finishes.
    /// A failure or timeout is logged once, here, and reported through the
    /// handle for callers that want to inspect it.
    pub fn dispatch(&self, job: NotificationJob) -> DispatchHandle {
        let notifier = Arc::clone(&self.notifier);
        let timeout = self.timeout;

        let task = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, notifier.send(&job)).await {
                Ok(result) => result,
                Err(_) => Err(NotificationError::Timeout(timeout)),
            };

            if let Err(ref error) = outcome {
                tracing::error!(
                    recipient = %mask_email(&job.recipient_email),
                    template = ?job.template,
                    error = %error,
                    event = "notification_dispatch_failed",
                    "Failed to deliver notification"
                );
            }
            outcome
        });

        DispatchHandle { task }
    }
}

/// A dispatch in flight
#[must_use = "a dispatch must be joined before the operation completes"]
pub struct DispatchHandle {
    task: JoinHandle<Result<(), NotificationError>>,
}

impl DispatchHandle {
    /// Wait for the dispatch attempt to finish
    pub async fn join(self) -> Result<(), NotificationError> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                tracing::error!(
                    error = %join_error,
                    event = "notification_task_failed",
                    "Notification task did not complete"
                );
                Err(NotificationError::Task(join_error.to_string()))
            }
        }
    }
}
