//! Exercise catalog and calorie estimation
//!
//! # Components
//! - `profile.rs`: Exercise profiles (joint triplet, calibration, kcal per rep)
//! - `calories.rs`: Calorie estimate for a finalized rep count

pub mod calories;
pub mod profile;

pub use profile::{Calibration, ExerciseProfile};
