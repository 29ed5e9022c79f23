//! Session state tracking
//!
//! Maintains:
//! - The session clock (start, fixed duration, deadline)
//! - Rep state machine and form history
//! - Frame accounting (scored, missed, incomplete)
//!
//! One `SessionState` per run. It is consumed by `finalize`, which is the
//! only way out; the state itself is never persisted.

use std::time::{Duration, Instant};
use tracing::debug;

use super::angle::joint_angle;
use super::form::FormTracker;
use super::reps::RepCounter;
use super::score::form_percentage;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::exercise::ExerciseProfile;
use crate::pose::frame::FrameMiss;
use crate::pose::{FrameSample, Point2};

/// Why frame acquisition stopped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndReason {
    /// The session ran its full duration
    #[default]
    Expired,
    /// An external abort was observed
    Aborted,
    /// The pose source failed
    SourceFailed,
}

/// Result of feeding one frame through the pipeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    Scored {
        points: [Point2; 3],
        angle: f64,
        percentage: f64,
    },
    Skipped(FrameMiss),
}

/// Per-session frame counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub scored: u32,
    pub missed: u32,
    pub incomplete: u32,
}

/// Finalized session figures, handed to calorie estimation and the record builder
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub exercise: &'static str,
    pub requested_reps: u32,
    /// Count in 0.5 steps
    pub count: f64,
    /// Completed reps (count floored)
    pub reps: u32,
    /// Mean form percentage over every scored frame, 0 if none
    pub average_score: f64,
    pub peak_score: f64,
    pub frames: FrameStats,
    pub elapsed: Duration,
    pub end_reason: EndReason,
}

/// Complete session state
#[derive(Clone, Debug)]
pub struct SessionState {
    profile: &'static ExerciseProfile,
    requested_reps: u32,
    counter: RepCounter,
    form: FormTracker,
    started_at: Instant,
    deadline: Instant,
    frames: FrameStats,
    /// Timestamp of the previous frame, for the FPS readout
    last_frame_ts: Option<f64>,
    fps: f64,
}

impl SessionState {
    /// Start a session at `now`; the deadline is fixed from here on.
    ///
    /// Fails when the session length does not fit the clock.
    pub fn start(
        profile: &'static ExerciseProfile,
        requested_reps: u32,
        config: &TrackerConfig,
        now: Instant,
    ) -> Result<Self, TrackerError> {
        let deadline = config
            .session_duration(requested_reps)
            .and_then(|duration| {
                now.checked_add(duration)
                    .ok_or(TrackerError::InvalidSessionLength {
                        requested_reps,
                        seconds_per_rep: config.seconds_per_rep,
                    })
            })?;

        Ok(SessionState {
            profile,
            requested_reps,
            counter: RepCounter::new(config.thresholds),
            form: FormTracker::new(),
            started_at: now,
            deadline,
            frames: FrameStats::default(),
            last_frame_ts: None,
            fps: 0.0,
        })
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline()
    }

    /// Time until the deadline, zero once it has passed
    pub fn time_left(&self, now: Instant) -> Duration {
        self.deadline().saturating_duration_since(now)
    }

    /// Angle → percentage → rep state → history, for one frame
    pub fn process_frame(&mut self, frame: &FrameSample) -> FrameOutcome {
        self.update_fps(frame.timestamp);

        let points = match frame.points(self.profile.joints.ids()) {
            Ok(points) => points,
            Err(miss) => {
                match miss {
                    FrameMiss::NoDetection => self.frames.missed += 1,
                    FrameMiss::MissingJoint(_) => self.frames.incomplete += 1,
                }
                debug!("Skipping frame at {:.3}s: {:?}", frame.timestamp, miss);
                return FrameOutcome::Skipped(miss);
            }
        };

        let [proximal, pivot, distal] = points;
        let angle = joint_angle(proximal, pivot, distal);
        let percentage = form_percentage(angle, self.profile.calibration);

        self.form.record(percentage);
        self.frames.scored += 1;

        if self.counter.observe(percentage) {
            debug!(
                "Half rep {} at {:.3}s (angle {:.1}°, form ema {:.1}, now {:?})",
                self.counter.half_reps(),
                frame.timestamp,
                angle,
                self.form.ema(),
                self.counter.direction()
            );
        }

        FrameOutcome::Scored {
            points,
            angle,
            percentage,
        }
    }

    fn update_fps(&mut self, timestamp: f64) {
        if let Some(prev) = self.last_frame_ts {
            let dt = timestamp - prev;
            if dt > 0.0 {
                self.fps = 1.0 / dt;
            }
        }
        self.last_frame_ts = Some(timestamp);
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    /// Instantaneous frame rate from the last two frame timestamps
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Close the session and discard its state
    pub fn finalize(self, now: Instant, end_reason: EndReason) -> SessionSummary {
        SessionSummary {
            exercise: self.profile.name,
            requested_reps: self.requested_reps,
            count: self.counter.count(),
            reps: self.counter.whole_reps(),
            average_score: self.form.average(),
            peak_score: self.form.peak(),
            frames: self.frames,
            elapsed: now.saturating_duration_since(self.started_at),
            end_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::frame::{LEFT_ELBOW, LEFT_SHOULDER, LEFT_WRIST};
    use std::collections::BTreeMap;

    fn curls() -> &'static ExerciseProfile {
        ExerciseProfile::lookup("Bicep Curls").unwrap()
    }

    /// Arm frame whose elbow angle is `angle` degrees
    fn arm_at(timestamp: f64, angle: f64) -> FrameSample {
        let pivot = Point2::new(0.0, 0.0);
        let rad = angle.to_radians();
        let mut joints = BTreeMap::new();
        joints.insert(LEFT_SHOULDER, Point2::new(1.0, 0.0));
        joints.insert(LEFT_ELBOW, pivot);
        joints.insert(LEFT_WRIST, Point2::new(rad.cos(), rad.sin()));
        FrameSample::detected(timestamp, joints)
    }

    #[test]
    fn test_deadline_from_requested_reps() {
        let now = Instant::now();
        let state = SessionState::start(curls(), 3, &TrackerConfig::default(), now).unwrap();
        assert_eq!(state.deadline() - now, Duration::from_secs(24));
        assert!(!state.is_expired(now));
        assert!(state.is_expired(now + Duration::from_secs(24)));
        assert_eq!(state.time_left(now + Duration::from_secs(30)), Duration::ZERO);
    }

    #[test]
    fn test_oversized_session_fails_to_start() {
        let config = TrackerConfig {
            seconds_per_rep: u64::MAX / 2,
            ..TrackerConfig::default()
        };
        let err = SessionState::start(curls(), 3, &config, Instant::now()).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidSessionLength { .. }));
    }

    #[test]
    fn test_full_rep_through_pipeline() {
        let now = Instant::now();
        let mut state = SessionState::start(curls(), 1, &TrackerConfig::default(), now).unwrap();

        state.process_frame(&arm_at(0.0, 150.0));
        match state.process_frame(&arm_at(0.1, 50.0)) {
            FrameOutcome::Scored { percentage, .. } => assert_eq!(percentage, 100.0),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(state.counter().count(), 0.5);

        state.process_frame(&arm_at(0.2, 110.0));
        state.process_frame(&arm_at(0.3, 170.0));

        let summary = state.finalize(now + Duration::from_secs(8), EndReason::Expired);
        assert_eq!(summary.count, 1.0);
        assert_eq!(summary.reps, 1);
        assert_eq!(summary.frames.scored, 4);
        assert_eq!(summary.exercise, "Bicep Curls");
        // (10 + 100 + 50 + 0) / 4
        assert!((summary.average_score - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_skipped_frames_do_not_count_toward_average() {
        let now = Instant::now();
        let mut state = SessionState::start(curls(), 1, &TrackerConfig::default(), now).unwrap();

        state.process_frame(&FrameSample::missed(0.0));
        let mut partial = BTreeMap::new();
        partial.insert(LEFT_ELBOW, Point2::new(0.0, 0.0));
        let outcome = state.process_frame(&FrameSample::detected(0.1, partial));
        assert_eq!(
            outcome,
            FrameOutcome::Skipped(FrameMiss::MissingJoint(LEFT_SHOULDER))
        );
        state.process_frame(&arm_at(0.2, 110.0));

        let summary = state.finalize(now, EndReason::Aborted);
        assert_eq!(summary.frames.missed, 1);
        assert_eq!(summary.frames.incomplete, 1);
        assert_eq!(summary.frames.scored, 1);
        assert!((summary.average_score - 50.0).abs() < 1e-6);
        assert_eq!(summary.end_reason, EndReason::Aborted);
    }

    #[test]
    fn test_empty_session_finalizes_to_zero() {
        let now = Instant::now();
        let state = SessionState::start(curls(), 2, &TrackerConfig::default(), now).unwrap();
        let summary = state.finalize(now, EndReason::Aborted);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.reps, 0);
        assert_eq!(summary.count, 0.0);
    }

    #[test]
    fn test_fps_from_timestamps() {
        let now = Instant::now();
        let mut state = SessionState::start(curls(), 1, &TrackerConfig::default(), now).unwrap();
        state.process_frame(&FrameSample::missed(1.0));
        state.process_frame(&FrameSample::missed(1.04));
        assert!((state.fps() - 25.0).abs() < 1e-6);
    }
}
