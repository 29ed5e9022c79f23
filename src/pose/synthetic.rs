//! Synthetic pose source
//!
//! Sweeps a joint triplet's angle through (and slightly past) a calibration
//! range as a cosine, so the demo and headless runs have something to count.
//! Jitter and detection misses are drawn from a seeded RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::thread;
use std::time::{Duration, Instant};

use super::frame::{FrameSample, JointId, Point2};
use super::source::PoseSource;
use crate::error::SourceError;

/// Pivot position in normalized image space
const PIVOT: Point2 = Point2::new(0.5, 0.5);
/// Limb length in normalized units
const LIMB: f64 = 0.2;
/// Polar angle of the proximal limb (straight up on screen)
const PROXIMAL_HEADING_DEG: f64 = -90.0;

/// Motion parameters
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    pub fps: f64,
    /// Seconds for one full excursion and return
    pub period_secs: f64,
    /// Degrees swept beyond each end of the calibration range
    pub overshoot_deg: f64,
    /// Max uniform angle noise in degrees
    pub jitter_deg: f64,
    /// Probability that a frame has no detection
    pub miss_rate: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        SyntheticConfig {
            fps: 30.0,
            period_secs: 6.0,
            overshoot_deg: 10.0,
            jitter_deg: 2.0,
            miss_rate: 0.05,
            seed: 42,
        }
    }
}

/// Generates frames for a single joint triplet
pub struct SyntheticSource {
    joints: [JointId; 3],
    range: (f64, f64),
    config: SyntheticConfig,
    rng: StdRng,
    started: Option<Instant>,
    frame_index: u64,
}

impl SyntheticSource {
    pub fn new(joints: [JointId; 3], range: (f64, f64), config: SyntheticConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        SyntheticSource {
            joints,
            range,
            config,
            rng,
            started: None,
            frame_index: 0,
        }
    }

    /// Noise-free pivot angle at time `t`, starting fully extended
    pub fn target_angle(&self, t: f64) -> f64 {
        let (low, high) = self.range;
        let mid = (low + high) / 2.0;
        let amplitude = (high - low).abs() / 2.0 + self.config.overshoot_deg;
        let phase = if self.config.period_secs > 0.0 {
            TAU * t / self.config.period_secs
        } else {
            0.0
        };
        mid + amplitude * phase.cos()
    }

    /// Build the frame observed at time `t`
    pub fn sample_at(&mut self, t: f64) -> FrameSample {
        if self.config.miss_rate > 0.0 && self.rng.gen::<f64>() < self.config.miss_rate {
            return FrameSample::missed(t);
        }

        let mut angle = self.target_angle(t);
        if self.config.jitter_deg > 0.0 {
            let j = self.config.jitter_deg;
            angle += self.rng.gen_range(-j..=j);
        }

        let proximal = polar(PROXIMAL_HEADING_DEG);
        let distal = polar(PROXIMAL_HEADING_DEG + angle);

        let mut joints = BTreeMap::new();
        joints.insert(self.joints[0], proximal);
        joints.insert(self.joints[1], PIVOT);
        joints.insert(self.joints[2], distal);
        FrameSample::detected(t, joints)
    }
}

fn polar(heading_deg: f64) -> Point2 {
    let rad = heading_deg.to_radians();
    Point2::new(PIVOT.x + LIMB * rad.cos(), PIVOT.y + LIMB * rad.sin())
}

impl PoseSource for SyntheticSource {
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<FrameSample>, SourceError> {
        let started = *self.started.get_or_insert_with(Instant::now);
        let offset = self.frame_index as f64 / self.config.fps.max(1.0);
        let due = Duration::try_from_secs_f64(offset)
            .ok()
            .and_then(|offset| started.checked_add(offset))
            .ok_or_else(|| SourceError::Schedule(format!("synthetic frame {}", self.frame_index)))?;

        let now = Instant::now();
        if due > now {
            let wait = due - now;
            if wait > timeout {
                thread::sleep(timeout);
                return Ok(None);
            }
            thread::sleep(wait);
        }

        self.frame_index += 1;
        let t = started.elapsed().as_secs_f64();
        Ok(Some(self.sample_at(t)))
    }
}
