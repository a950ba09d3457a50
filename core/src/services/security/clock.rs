//! Time source

use chrono::{DateTime, Utc};

/// Source of the current time
///
/// OTP issuance and verification read the time through this trait so expiry
/// can be exercised without waiting.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
