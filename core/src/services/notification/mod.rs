//! Notification module for outbound OTP delivery
//!
//! - `traits` - The [`Notifier`] seam implemented by delivery backends
//! - `dispatcher` - Runs a send as a spawned task with a time budget; the
//!   caller joins the returned [`DispatchHandle`] before completing

mod dispatcher;
mod traits;


pub use dispatcher::{DispatchHandle, NotificationDispatcher};
pub use traits::{NotificationError, Notifier};
