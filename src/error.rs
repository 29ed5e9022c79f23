//! Error taxonomy for tracking sessions
//!
//! - Configuration errors fail before a session clock starts
//! - Store errors are kept apart from the workout itself
//! - Source errors end frame acquisition early

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::WorkoutRecord;

/// Failures surfaced by a tracking session
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Unsupported exercise: {0}")]
    UnknownExercise(String),

    #[error("Requested rep count must be positive (got {0})")]
    InvalidRepCount(u32),

    #[error("Session length out of range: {requested_reps} reps at {seconds_per_rep}s each")]
    InvalidSessionLength {
        requested_reps: u32,
        seconds_per_rep: u64,
    },

    /// Tracking finished but the record could not be appended
    #[error("Workout tracked but record was not saved: {source}")]
    RecordNotSaved {
        record: WorkoutRecord,
        #[source]
        source: StoreError,
    },
}

/// Workout store I/O failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode workout history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Pose source failures
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("pose source I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed pose data: {0}")]
    Parse(String),

    #[error("pose source disconnected")]
    Disconnected,

    #[error("frame schedule out of range: {0}")]
    Schedule(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_not_saved_keeps_source() {
        use std::error::Error as _;

        let err = TrackerError::RecordNotSaved {
            record: WorkoutRecord {
                exercise_name: "Squats".into(),
                reps: 3,
                score: 70.0,
                calories: 2.4,
                timestamp: "2026-10-16 08:00:00".into(),
            },
            source: StoreError::Write {
                path: PathBuf::from("history.json"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
        };
        assert!(err.to_string().starts_with("Workout tracked but record was not saved"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_exercise_message() {
        let err = TrackerError::UnknownExercise("pilates".into());
        assert_eq!(err.to_string(), "Unsupported exercise: pilates");
    }
}
