//! Time source for cache ages.
//!
//! Ages are measured with `std::time::Instant`, which is monotonic and immune
//! to system clock changes. `ManualClock` only moves when told to and is
//! meant for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of "now" for TTL checks.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock backed by `Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that advances only through [`ManualClock::advance`].
///
/// Clones share the same offset, so a test can keep one handle and give the
/// other to a cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset_ns: Arc<AtomicU64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset_ns: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let by_ns = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .offset_ns
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |ns| {
                Some(ns.saturating_add(by_ns))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_nanos(self.offset_ns.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        handle.advance(Duration::from_secs(30));
        assert_eq!(clock.now().duration_since(start), Duration::from_secs(30));
    }

    #[test]
    fn sub_millisecond_advances_accumulate() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.advance(Duration::from_micros(500));
        clock.advance(Duration::from_micros(500));
        clock.advance(Duration::from_nanos(1));

        assert_eq!(
            clock.now().duration_since(start),
            Duration::from_nanos(1_000_001)
        );
    }
}
