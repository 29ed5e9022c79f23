//! Session tunables

use std::time::Duration;

use crate::error::TrackerError;

/// Fixed time budget per requested repetition
pub const SECONDS_PER_REP: u64 = 8;

/// How long the loop waits on the pose source before re-checking the clock
pub const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Upper bound accepted for `seconds_per_rep`
pub const MAX_SECONDS_PER_REP: u64 = 3600;

/// Default location of the workout history file
pub const DEFAULT_HISTORY_PATH: &str = "database/workout_history.json";

/// Percentages that trigger the two half-rep transitions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepThresholds {
    /// At or above: top of the movement reached
    pub top: f64,
    /// At or below: bottom of the movement reached
    pub bottom: f64,
}

impl RepThresholds {
    /// Exact extremes (100 / 0)
    pub const EXACT: RepThresholds = RepThresholds {
        top: 100.0,
        bottom: 0.0,
    };

    /// Symmetric band: top at `100 - tolerance`, bottom at `tolerance`
    pub fn with_tolerance(tolerance: f64) -> Self {
        if !tolerance.is_finite() {
            return Self::EXACT;
        }
        let t = tolerance.clamp(0.0, 49.0);
        RepThresholds {
            top: 100.0 - t,
            bottom: t,
        }
    }
}

impl Default for RepThresholds {
    fn default() -> Self {
        Self::EXACT
    }
}

/// Tracker configuration
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    pub seconds_per_rep: u64,
    pub poll_timeout: Duration,
    pub thresholds: RepThresholds,
}

impl TrackerConfig {
    /// Session length for a requested rep count
    pub fn session_duration(&self, requested_reps: u32) -> Result<Duration, TrackerError> {
        if self.seconds_per_rep > MAX_SECONDS_PER_REP {
            return Err(TrackerError::InvalidSessionLength {
                requested_reps,
                seconds_per_rep: self.seconds_per_rep,
            });
        }
        self.seconds_per_rep
            .checked_mul(requested_reps as u64)
            .map(Duration::from_secs)
            .ok_or(TrackerError::InvalidSessionLength {
                requested_reps,
                seconds_per_rep: self.seconds_per_rep,
            })
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            seconds_per_rep: SECONDS_PER_REP,
            poll_timeout: POLL_TIMEOUT,
            thresholds: RepThresholds::default(),
        }
    }
}

/// clap parser for `--tolerance`: a finite percentage in [0, 49]
pub fn parse_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() || !(0.0..=49.0).contains(&value) {
        return Err(format!("tolerance must be a number in [0, 49], got {s}"));
    }
    Ok(value)
}

/// clap parser for frame rates: finite and positive
pub fn parse_fps(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("fps must be a positive number, got {s}"));
    }
    Ok(value)
}
