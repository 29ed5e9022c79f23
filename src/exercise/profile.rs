//! Exercise profiles: which joints to watch, how to score them, what a rep burns
//!
//! The table is static. Lookups for names outside it fail with
//! `TrackerError::UnknownExercise`.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use crate::error::TrackerError;
use crate::pose::frame::{
    JointId, LEFT_ELBOW, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE, RIGHT_ELBOW, RIGHT_HIP,
    RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};

/// Proximal, pivot and distal joints; the angle of interest sits at the pivot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JointTriplet {
    pub proximal: JointId,
    pub pivot: JointId,
    pub distal: JointId,
}

impl JointTriplet {
    pub const fn new(proximal: JointId, pivot: JointId, distal: JointId) -> Self {
        JointTriplet {
            proximal,
            pivot,
            distal,
        }
    }

    pub fn ids(&self) -> [JointId; 3] {
        [self.proximal, self.pivot, self.distal]
    }
}

/// Angle range mapped onto form completion: `low` scores 100%, `high` scores 0%
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub low: f64,
    pub high: f64,
}

/// Shoulder → elbow → wrist (left arm)
const LEFT_ARM: JointTriplet = JointTriplet::new(LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST);
/// Shoulder → elbow → wrist (right arm)
const RIGHT_ARM: JointTriplet = JointTriplet::new(RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST);
/// Hip → knee → ankle (right leg)
const RIGHT_LEG: JointTriplet = JointTriplet::new(RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE);

const DEFAULT_CALIBRATION: Calibration = Calibration {
    low: 60.0,
    high: 160.0,
};

#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseProfile {
    pub name: &'static str,
    pub joints: JointTriplet,
    pub calibration: Calibration,
    pub calories_per_rep: f64,
}

const fn profile(name: &'static str, joints: JointTriplet, calories_per_rep: f64) -> ExerciseProfile {
    ExerciseProfile {
        name,
        joints,
        calibration: DEFAULT_CALIBRATION,
        calories_per_rep,
    }
}

/// Every supported exercise
pub const PROFILES: &[ExerciseProfile] = &[
    profile("Bicep Curls", LEFT_ARM, 0.5),
    profile("Squats", RIGHT_LEG, 0.8),
    profile("Push-ups", RIGHT_ARM, 0.7),
    profile("Lunges", RIGHT_LEG, 0.6),
    profile("Deadlifts", RIGHT_LEG, 1.2),
    profile("Planks", RIGHT_ARM, 0.3),
    profile("Bench Press", RIGHT_ARM, 1.0),
];

fn index() -> &'static FxHashMap<&'static str, &'static ExerciseProfile> {
    static INDEX: OnceLock<FxHashMap<&'static str, &'static ExerciseProfile>> = OnceLock::new();
    INDEX.get_or_init(|| PROFILES.iter().map(|p| (p.name, p)).collect())
}

impl ExerciseProfile {
    /// Look up a profile by its exact name
    pub fn lookup(name: &str) -> Result<&'static ExerciseProfile, TrackerError> {
        index()
            .get(name)
            .copied()
            .ok_or_else(|| TrackerError::UnknownExercise(name.to_string()))
    }

    /// Names of all supported exercises, in table order
    pub fn names() -> impl Iterator<Item = &'static str> {
        PROFILES.iter().map(|p| p.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known() {
        let curls = ExerciseProfile::lookup("Bicep Curls").unwrap();
        assert_eq!(curls.joints.ids(), [11, 13, 15]);
        assert_eq!(curls.calibration, Calibration { low: 60.0, high: 160.0 });
        assert_eq!(curls.calories_per_rep, 0.5);

        let squats = ExerciseProfile::lookup("Squats").unwrap();
        assert_eq!(squats.joints.ids(), [24, 26, 28]);
    }

    #[test]
    fn test_lookup_unknown_fails() {
        for name in ["Yoga", "pilates", "bicep curls", ""] {
            let err = ExerciseProfile::lookup(name).unwrap_err();
            assert!(matches!(err, TrackerError::UnknownExercise(n) if n == name));
        }
    }

    #[test]
    fn test_table_names_unique() {
        let names: Vec<_> = ExerciseProfile::names().collect();
        assert_eq!(names.len(), 7);
        assert_eq!(index().len(), names.len());
    }
}
