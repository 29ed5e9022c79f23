//! Session Management: angle scoring, rep counting, and session aggregation
//!
//! # Components
//! - `angle.rs`: Joint angle at the pivot of a triplet
//! - `score.rs`: Angle → form completion percentage
//! - `reps.rs`: Half-rep state machine
//! - `form.rs`: Form history, mean and EMA
//! - `state.rs`: SessionState (clock + aggregation) and its summary
//! - `clock.rs`: Clock abstraction for the session loop

pub mod angle;
pub mod clock;
pub mod form;
pub mod reps;
pub mod score;
pub mod state;

pub use clock::{Clock, SystemClock};
pub use state::{EndReason, FrameOutcome, SessionState, SessionSummary};
