//! Workout record: the durable output of a session

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::exercise::calories::round2;
use crate::session::SessionSummary;

/// Timestamp layout used in the history file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub exercise_name: String,
    pub reps: u32,
    /// Average form score, 0-100, 2 decimals
    pub score: f64,
    /// 2 decimals
    pub calories: f64,
    pub timestamp: String,
}

impl WorkoutRecord {
    /// Build from a finalized summary, stamped with the current local time
    pub fn from_summary(summary: &SessionSummary, calories: f64) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(summary, calories, timestamp)
    }

    pub fn with_timestamp(summary: &SessionSummary, calories: f64, timestamp: String) -> Self {
        WorkoutRecord {
            exercise_name: summary.exercise.to_string(),
            reps: summary.reps,
            score: round2(summary.average_score),
            calories: round2(calories),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn summary() -> SessionSummary {
        SessionSummary {
            exercise: "Squats",
            requested_reps: 10,
            count: 10.5,
            reps: 10,
            average_score: 61.23456,
            ..SessionSummary::default()
        }
    }

    #[test]
    fn test_rounds_score_and_calories() {
        let record = WorkoutRecord::with_timestamp(&summary(), 8.000000000000002, "t".into());
        assert_eq!(record.exercise_name, "Squats");
        assert_eq!(record.reps, 10);
        assert_eq!(record.score, 61.23);
        assert_eq!(record.calories, 8.0);
    }

    #[test]
    fn test_timestamp_format() {
        let record = WorkoutRecord::from_summary(&summary(), 8.0);
        assert!(NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_field_names() {
        let record = WorkoutRecord::with_timestamp(&summary(), 8.0, "2026-01-01 10:00:00".into());
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["calories", "exercise_name", "reps", "score", "timestamp"]);
    }
}
