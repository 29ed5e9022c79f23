//! Joint angle at the pivot of a triplet
//!
//! Takes the difference of the two rays' polar angles (P2→P3 minus P2→P1)
//! and wraps negatives by one full turn, so results land in [0°, 360°).
//! Unlike an arccos of the dot product this keeps the side of the bend:
//! 90° and 270° are different poses.

use crate::pose::Point2;

/// Signed angle at `pivot`, in degrees, normalized into [0, 360)
pub fn joint_angle(proximal: Point2, pivot: Point2, distal: Point2) -> f64 {
    let to_distal = (distal.y - pivot.y).atan2(distal.x - pivot.x);
    let to_proximal = (proximal.y - pivot.y).atan2(proximal.x - pivot.x);

    let mut angle = (to_distal - to_proximal).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    // -0.0 + tiny negatives can round up to exactly 360.0
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_straight_arm() {
        let angle = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_bent_arm_keeps_side() {
        // Same bend mirrored across the upper arm
        let down = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(0.5, 0.5));
        let up = joint_angle(p(0.0, 0.0), p(0.5, 0.0), p(0.5, -0.5));
        assert!((down - 270.0).abs() < 1e-9);
        assert!((up - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_for_many_triplets() {
        let pivot = p(3.0, -2.0);
        for i in 0..36 {
            for j in 0..36 {
                if i == j || (i + 18) % 36 == j {
                    continue;
                }
                let a = (i as f64 * 10.0).to_radians();
                let b = (j as f64 * 10.0).to_radians();
                let p1 = p(pivot.x + 2.0 * a.cos(), pivot.y + 2.0 * a.sin());
                let p3 = p(pivot.x + 5.0 * b.cos(), pivot.y + 5.0 * b.sin());
                let angle = joint_angle(p1, pivot, p3);
                assert!((0.0..360.0).contains(&angle), "angle {angle} out of range");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let (a, b, c) = (p(120.0, 80.0), p(140.0, 200.0), p(260.0, 210.0));
        let first = joint_angle(a, b, c);
        for _ in 0..10 {
            assert_eq!(joint_angle(a, b, c).to_bits(), first.to_bits());
        }
    }
}
