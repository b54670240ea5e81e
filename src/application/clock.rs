// src/application/clock.rs
use chrono::Utc;

use crate::domain::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().timestamp_millis()
    }
}
