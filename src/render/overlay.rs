//! Overlay instructions for one frame

use serde::Serialize;
use std::time::Duration;

use crate::pose::Point2;

/// Line segment between two joints
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point2,
    pub to: Point2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// Joint angle, drawn beside the pivot
    Angle,
    Reps,
    Form,
    Fps,
    TimeLeft,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
    /// Anchor in image space; `None` for fixed HUD slots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<Point2>,
}

/// Everything a sink may draw for one frame
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Overlay {
    pub timestamp: f64,
    pub segments: Vec<Segment>,
    pub markers: Vec<Point2>,
    pub labels: Vec<Label>,
}

impl Overlay {
    /// HUD shown on every frame: rep count, FPS, whole seconds left
    pub fn hud(timestamp: f64, reps: u32, fps: f64, time_left: Duration) -> Self {
        let labels = vec![
            Label {
                kind: LabelKind::Reps,
                text: reps.to_string(),
                at: None,
            },
            Label {
                kind: LabelKind::Fps,
                text: format!("FPS: {}", fps as u32),
                at: None,
            },
            Label {
                kind: LabelKind::TimeLeft,
                text: format!("Time Left: {}", time_left.as_secs()),
                at: None,
            },
        ];

        Overlay {
            timestamp,
            labels,
            ..Overlay::default()
        }
    }

    /// Add the scored triplet: both limbs, three markers, angle and form labels
    pub fn with_triplet(mut self, points: [Point2; 3], angle: f64, percentage: f64) -> Self {
        let [proximal, pivot, distal] = points;
        self.segments.push(Segment {
            from: proximal,
            to: pivot,
        });
        self.segments.push(Segment {
            from: distal,
            to: pivot,
        });
        self.markers.extend_from_slice(&points);

        self.labels.push(Label {
            kind: LabelKind::Angle,
            text: (angle as i64).to_string(),
            at: Some(pivot),
        });
        self.labels.push(Label {
            kind: LabelKind::Form,
            text: format!("{:.0}%", percentage),
            at: None,
        });
        self
    }

    pub fn label(&self, kind: LabelKind) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.text.as_str())
    }
}
