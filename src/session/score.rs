//! Form completion percentage from a raw joint angle
//!
//! Linear and inverted: the calibration's `low` angle maps to 100%, `high`
//! maps to 0%. Angles outside the range clamp to the nearer bound so one bad
//! frame can't push the session average outside [0, 100].

use crate::exercise::Calibration;

/// Map an angle onto [0, 100]
pub fn form_percentage(angle: f64, calibration: Calibration) -> f64 {
    let Calibration { low, high } = calibration;

    let span = high - low;
    if span.abs() < f64::EPSILON {
        // Degenerate range: a step at the single calibration angle
        return if angle <= low { 100.0 } else { 0.0 };
    }

    let t = ((angle - low) / span).clamp(0.0, 1.0);
    100.0 * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAL: Calibration = Calibration {
        low: 60.0,
        high: 160.0,
    };

    #[test]
    fn test_endpoints() {
        assert_eq!(form_percentage(60.0, CAL), 100.0);
        assert_eq!(form_percentage(160.0, CAL), 0.0);
        assert_eq!(form_percentage(110.0, CAL), 50.0);
    }

    #[test]
    fn test_clamps_outside_range() {
        assert_eq!(form_percentage(10.0, CAL), 100.0);
        assert_eq!(form_percentage(59.999, CAL), 100.0);
        assert_eq!(form_percentage(200.0, CAL), 0.0);
        assert_eq!(form_percentage(350.0, CAL), 0.0);
    }

    #[test]
    fn test_monotonic_and_linear() {
        let mut prev = form_percentage(60.0, CAL);
        for step in 1..=100 {
            let angle = 60.0 + step as f64;
            let pct = form_percentage(angle, CAL);
            assert!(pct <= prev);
            assert!((pct - (100.0 - step as f64)).abs() < 1e-9);
            prev = pct;
        }
    }
}
