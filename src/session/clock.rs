//! Session clock
//!
//! The loop's only notion of time. Production uses the monotonic system
//! clock; tests drive a manual clock so timed sessions finish instantly.

use std::time::Instant;

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    /// Clock advanced by hand; clones share the same time
    #[derive(Clone, Debug)]
    pub struct ManualClock {
        base: Instant,
        offset: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            ManualClock {
                base: Instant::now(),
                offset: Rc::new(Cell::new(Duration::ZERO)),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.offset.set(self.offset.get() + by);
        }

        pub fn elapsed(&self) -> Duration {
            self.offset.get()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + self.offset.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();

        other.advance(Duration::from_secs(3));
        assert_eq!(clock.now() - start, Duration::from_secs(3));
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
