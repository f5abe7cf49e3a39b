//! Injectable time source
//!
//! Throttle windows, persistence debouncing, and tour timers all measure
//! wall-clock milliseconds through this trait so tests can drive time by
//! hand instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A monotonic-enough millisecond clock.
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Hand-driven clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    ms: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at the given millisecond.
    pub fn at(ms: u64) -> Self {
        Self {
            ms: AtomicU64::new(ms),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, delta_ms: u64) {
        self.ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Set the clock to an absolute time.
    pub fn set(&self, ms: u64) {
        self.ms.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at(1000);
        assert_eq!(clock.now_ms(), 1000);

        clock.advance(33);
        assert_eq!(clock.now_ms(), 1033);

        clock.set(5000);
        assert_eq!(clock.now_ms(), 5000);
    }

    #[test]
    fn test_shared_clock_through_arc() {
        let clock = Arc::new(ManualClock::at(0));
        let handle: Arc<dyn Clock> = clock.clone();

        clock.advance(10);
        assert_eq!(handle.now_ms(), 10);
    }

    #[test]
    fn test_system_clock_is_plausible() {
        // Anything after 2020-01-01 counts as plausible.
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
