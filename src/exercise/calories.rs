//! Calorie estimate from a finalized rep count

use super::profile::ExerciseProfile;
use crate::error::TrackerError;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calories for whole reps of a resolved profile
pub fn estimate(profile: &ExerciseProfile, reps: u32) -> f64 {
    round2(profile.calories_per_rep * reps as f64)
}

/// Calories by exercise name; unknown names fail like profile lookups do
pub fn estimate_by_name(exercise: &str, reps: u32) -> Result<f64, TrackerError> {
    ExerciseProfile::lookup(exercise).map(|profile| estimate(profile, reps))
}
