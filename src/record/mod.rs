//! Workout records and their store
//!
//! # Components
//! - `workout.rs`: WorkoutRecord built from a finalized session
//! - `store.rs`: WorkoutStore trait and the JSON file store

pub mod store;
pub mod workout;

pub use store::{JsonFileStore, WorkoutStore};
pub use workout::WorkoutRecord;
