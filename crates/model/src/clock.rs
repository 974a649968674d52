use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the timestamps recorded with each entry.
pub trait Clock {
    /// Current timestamp in unix seconds.
    fn now(&self) -> i64;
}

impl<F: Fn() -> i64> Clock for F {
    fn now(&self) -> i64 {
        (self)()
    }
}

/// Wall clock in unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
