//! Clock port — injectable current time.
//!
//! Ranking and cache expiry both depend on "now"; injecting it keeps the
//! feed pipeline and the TTL cache deterministic under test.

use meetral_domain::time::Timestamp;

/// Source of the current instant.
pub trait Clock {
    /// The current UTC time.
    fn now(&self) -> Timestamp;
}

/// Production clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        meetral_domain::time::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_advance_with_system_time() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
