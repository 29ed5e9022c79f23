//! Tracking session runner
//!
//! One sequential loop per session: poll the pose source, push the frame
//! through angle → percentage → rep state → history, repeat until the clock
//! runs out or an abort is observed. Then estimate calories, build the record
//! and append it to the store.
//!
//! The loop condition is time-based. A stalled source never holds a session
//! past its deadline because each wait is capped at the time left.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::exercise::{calories, ExerciseProfile};
use crate::pose::PoseSource;
use crate::record::{WorkoutRecord, WorkoutStore};
use crate::render::{Overlay, RenderSink};
use crate::session::{Clock, EndReason, FrameOutcome, SessionState, SessionSummary, SystemClock};

/// External request to stop a running session
pub trait AbortSignal {
    /// Polled once per loop iteration
    fn should_abort(&mut self) -> bool;
}

/// A finished and persisted session
#[derive(Clone, Debug)]
pub struct CompletedSession {
    pub summary: SessionSummary,
    pub record: WorkoutRecord,
}

/// Runs tracking sessions against a clock
pub struct Tracker<C: Clock = SystemClock> {
    config: TrackerConfig,
    clock: C,
}

impl<C: Clock> Tracker<C> {
    pub fn new(config: TrackerConfig, clock: C) -> Self {
        Tracker { config, clock }
    }

    /// Track one session and return its finalized figures.
    ///
    /// Configuration errors are raised before the clock starts or the source
    /// is touched.
    pub fn run(
        &self,
        exercise: &str,
        requested_reps: u32,
        source: &mut dyn PoseSource,
        mut sink: Option<&mut dyn RenderSink>,
        abort: &mut dyn AbortSignal,
    ) -> Result<SessionSummary, TrackerError> {
        let profile = ExerciseProfile::lookup(exercise)?;
        if requested_reps == 0 {
            return Err(TrackerError::InvalidRepCount(requested_reps));
        }

        let started = self.clock.now();
        let mut state = SessionState::start(profile, requested_reps, &self.config, started)?;
        info!(
            "Tracking {} for {} reps ({}s)",
            profile.name,
            requested_reps,
            state.time_left(started).as_secs()
        );

        let mut sink_ok = true;
        let end_reason = loop {
            if abort.should_abort() {
                break EndReason::Aborted;
            }

            let now = self.clock.now();
            if state.is_expired(now) {
                break EndReason::Expired;
            }

            let wait = state.time_left(now).min(self.config.poll_timeout);
            let frame = match source.next_frame(wait) {
                Ok(Some(frame)) => frame,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Pose source failed, finishing early: {}", e);
                    break EndReason::SourceFailed;
                }
            };

            let outcome = state.process_frame(&frame);

            if let Some(sink) = sink.as_deref_mut().filter(|_| sink_ok) {
                let mut overlay = Overlay::hud(
                    frame.timestamp,
                    state.counter().whole_reps(),
                    state.fps(),
                    state.time_left(self.clock.now()),
                );
                if let FrameOutcome::Scored {
                    points,
                    angle,
                    percentage,
                } = outcome
                {
                    overlay = overlay.with_triplet(points, angle, percentage);
                }

                if let Err(e) = sink.draw(&overlay) {
                    warn!("Render sink failed, continuing without it: {}", e);
                    sink_ok = false;
                }
            }
        };

        if let Some(sink) = sink.as_deref_mut().filter(|_| sink_ok) {
            if let Err(e) = sink.finish() {
                warn!("Render sink failed to finish: {}", e);
            }
        }

        let summary = state.finalize(self.clock.now(), end_reason);
        info!(
            "Session over ({:?}): {}/{} reps (count {:.1}), score {:.2} (peak {:.0}), frames {} scored / {} missed / {} incomplete",
            summary.end_reason,
            summary.reps,
            summary.requested_reps,
            summary.count,
            summary.average_score,
            summary.peak_score,
            summary.frames.scored,
            summary.frames.missed,
            summary.frames.incomplete
        );
        Ok(summary)
    }

    /// Track a session, then estimate calories and append the record
    pub fn track(
        &self,
        exercise: &str,
        requested_reps: u32,
        source: &mut dyn PoseSource,
        sink: Option<&mut dyn RenderSink>,
        abort: &mut dyn AbortSignal,
        store: &mut dyn WorkoutStore,
    ) -> Result<CompletedSession, TrackerError> {
        let summary = self.run(exercise, requested_reps, source, sink, abort)?;

        let calories = calories::estimate_by_name(summary.exercise, summary.reps)?;
        let record = WorkoutRecord::from_summary(&summary, calories);

        match store.append(record.clone()) {
            Ok(total) => {
                info!("Workout saved ({} records in history)", total);
                Ok(CompletedSession { summary, record })
            }
            Err(source) => {
                warn!("Could not save workout record: {}", source);
                Err(TrackerError::RecordNotSaved { record, source })
            }
        }
    }
}

/// Caller-facing result of a session invocation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_reference: Option<String>,
    /// False when the workout was tracked but its record was lost
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

impl SessionResult {
    pub fn from_outcome(
        outcome: &Result<CompletedSession, TrackerError>,
        render_reference: Option<String>,
    ) -> Self {
        match outcome {
            Ok(done) => Self::tracked(&done.record, render_reference, true, completed_message(&done.record)),
            Err(err @ TrackerError::RecordNotSaved { record, .. }) => {
                let message = format!("{} ({})", completed_message(record), err);
                Self::tracked(record, render_reference, false, message)
            }
            Err(err) => SessionResult {
                success: false,
                message: err.to_string(),
                reps: None,
                calories: None,
                score: None,
                render_reference: None,
                persisted: None,
            },
        }
    }

    fn tracked(
        record: &WorkoutRecord,
        render_reference: Option<String>,
        persisted: bool,
        message: String,
    ) -> Self {
        SessionResult {
            success: true,
            message,
            reps: Some(record.reps),
            calories: Some(record.calories),
            score: Some(record.score),
            render_reference,
            persisted: Some(persisted),
        }
    }
}

fn completed_message(record: &WorkoutRecord) -> String {
    format!(
        "Workout Completed: {} reps | Calories Burned: {} kcal",
        record.reps, record.calories
    )
}
