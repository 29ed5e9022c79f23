//! Frame samples delivered by a pose source
//!
//! Joint identifiers follow the MediaPipe Pose landmark indices (33 total).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Landmark index in the pose model
pub type JointId = u32;

pub const LEFT_SHOULDER: JointId = 11;
pub const RIGHT_SHOULDER: JointId = 12;
pub const LEFT_ELBOW: JointId = 13;
pub const RIGHT_ELBOW: JointId = 14;
pub const LEFT_WRIST: JointId = 15;
pub const RIGHT_WRIST: JointId = 16;
pub const RIGHT_HIP: JointId = 24;
pub const RIGHT_KNEE: JointId = 26;
pub const RIGHT_ANKLE: JointId = 28;

/// A 2-D joint position (pixel or normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(xy: [f64; 2]) -> Self {
        Point2 { x: xy[0], y: xy[1] }
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

/// Why a frame could not be scored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameMiss {
    /// The pose model found no body in the frame
    NoDetection,
    /// A body was found but this joint was not
    MissingJoint(JointId),
}

/// One observation from the pose source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    /// Monotonic capture time in seconds
    pub timestamp: f64,
    /// Joint positions, `None` when nothing was detected
    #[serde(default)]
    pub joints: Option<BTreeMap<JointId, Point2>>,
}

impl FrameSample {
    pub fn detected(timestamp: f64, joints: BTreeMap<JointId, Point2>) -> Self {
        FrameSample {
            timestamp,
            joints: Some(joints),
        }
    }

    pub fn missed(timestamp: f64) -> Self {
        FrameSample {
            timestamp,
            joints: None,
        }
    }

    /// Resolve three joints in order, or report the first reason they can't be
    pub fn points(&self, ids: [JointId; 3]) -> Result<[Point2; 3], FrameMiss> {
        let joints = match &self.joints {
            Some(j) if !j.is_empty() => j,
            _ => return Err(FrameMiss::NoDetection),
        };

        let lookup = |id: JointId| joints.get(&id).copied().ok_or(FrameMiss::MissingJoint(id));
        Ok([lookup(ids[0])?, lookup(ids[1])?, lookup(ids[2])?])
    }
}
