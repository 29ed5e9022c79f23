//! Pose input: frame samples and the sources that produce them
//!
//! # Components
//! - `frame.rs`: Joint identifiers, 2-D points, per-frame samples
//! - `source.rs`: `PoseSource` trait and the JSON replay source
//! - `synthetic.rs`: Seeded motion generator for a joint triplet

pub mod frame;
pub mod source;
pub mod synthetic;

pub use frame::{FrameSample, Point2};
pub use source::{PoseSource, ReplaySource};
pub use synthetic::{SyntheticConfig, SyntheticSource};
