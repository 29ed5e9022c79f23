//! Repetition state machine
//!
//! Two states. Reaching the top threshold while waiting for the top adds a
//! half rep and flips to waiting for the bottom; reaching the bottom threshold
//! while waiting for the bottom adds the other half and flips back. Anything
//! else leaves the state alone. There is no reset within a session.

use crate::config::RepThresholds;

/// Which extreme the counter is waiting for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// direction = 0
    #[default]
    WaitingForTop,
    /// direction = 1
    WaitingForBottom,
}

/// Half-rep counter driven by the form percentage stream
#[derive(Clone, Debug)]
pub struct RepCounter {
    direction: Direction,
    /// Count in half reps; only ever incremented by one
    half_reps: u32,
    thresholds: RepThresholds,
}

impl RepCounter {
    pub fn new(thresholds: RepThresholds) -> Self {
        RepCounter {
            direction: Direction::WaitingForTop,
            half_reps: 0,
            thresholds,
        }
    }

    /// Feed one percentage. Returns true when a half rep was added.
    pub fn observe(&mut self, percentage: f64) -> bool {
        match self.direction {
            Direction::WaitingForTop if percentage >= self.thresholds.top => {
                self.half_reps += 1;
                self.direction = Direction::WaitingForBottom;
                true
            }
            Direction::WaitingForBottom if percentage <= self.thresholds.bottom => {
                self.half_reps += 1;
                self.direction = Direction::WaitingForTop;
                true
            }
            _ => false,
        }
    }

    /// Count in 0.5 steps
    pub fn count(&self) -> f64 {
        self.half_reps as f64 / 2.0
    }

    /// Completed reps (count floored to an integer)
    pub fn whole_reps(&self) -> u32 {
        self.half_reps / 2
    }

    pub fn half_reps(&self) -> u32 {
        self.half_reps
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(RepThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(values: &[f64]) -> RepCounter {
        let mut counter = RepCounter::default();
        for &v in values {
            counter.observe(v);
        }
        counter
    }

    #[test]
    fn test_initial_state() {
        let counter = RepCounter::default();
        assert_eq!(counter.direction(), Direction::WaitingForTop);
        assert_eq!(counter.count(), 0.0);
    }

    #[test]
    fn test_two_full_cycles_with_noise_between() {
        let counter = run(&[
            10.0, 40.0, 100.0, 80.0, 100.0, 30.0, 0.0, 0.0, 55.0, 100.0, 99.0, 12.0, 0.0, 50.0,
        ]);
        assert_eq!(counter.count(), 2.0);
        assert_eq!(counter.whole_reps(), 2);
        assert_eq!(counter.direction(), Direction::WaitingForTop);
    }

    #[test]
    fn test_never_reaching_extremes() {
        let counter = run(&[1.0, 99.0, 50.0, 0.5, 99.9, 2.0]);
        assert_eq!(counter.count(), 0.0);
    }

    #[test]
    fn test_bottom_first_is_ignored() {
        let counter = run(&[0.0, 0.0, 100.0]);
        assert_eq!(counter.count(), 0.5);
        assert_eq!(counter.whole_reps(), 0);
        assert_eq!(counter.direction(), Direction::WaitingForBottom);
    }

    #[test]
    fn test_count_steps_by_half() {
        let mut counter = RepCounter::default();
        let mut last = 0.0;
        for v in [100.0, 0.0, 100.0, 100.0, 0.0, 60.0, 100.0] {
            let changed = counter.observe(v);
            let now = counter.count();
            if changed {
                assert_eq!(now - last, 0.5);
            } else {
                assert_eq!(now, last);
            }
            last = now;
        }
        assert_eq!(counter.count(), 2.5);
    }

    #[test]
    fn test_tolerance_band() {
        let mut counter = RepCounter::new(RepThresholds::with_tolerance(5.0));
        for v in [96.0, 50.0, 4.0, 97.5, 3.0] {
            counter.observe(v);
        }
        assert_eq!(counter.count(), 2.0);
    }
}
