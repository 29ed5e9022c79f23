//! Pose source interface and the JSON replay source
//!
//! A replay file has the shape:
//! `{"frames": [{"timestamp": 0.0, "joints": {"13": [x, y], ...}}, ...]}`
//! with `"joints": null` marking a frame where nothing was detected.

use serde::Deserialize;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use super::frame::FrameSample;
use crate::error::SourceError;

/// Supplies one frame sample at a time
pub trait PoseSource {
    /// Wait up to `timeout` for the next frame.
    ///
    /// `Ok(None)` means nothing arrived in time; the caller re-checks its clock
    /// and asks again.
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<FrameSample>, SourceError>;
}

#[derive(Deserialize)]
struct ReplayFile {
    frames: Vec<FrameSample>,
}

/// Replays recorded frames in real time, relative to the first frame
pub struct ReplaySource {
    frames: VecDeque<FrameSample>,
    /// Wall-clock instant matched to the first frame's timestamp
    origin: Option<(Instant, f64)>,
}

impl ReplaySource {
    pub fn from_frames(frames: Vec<FrameSample>) -> Result<Self, SourceError> {
        if let Some(bad) = frames.iter().find(|f| !f.timestamp.is_finite()) {
            return Err(SourceError::Parse(format!(
                "non-finite frame timestamp: {}",
                bad.timestamp
            )));
        }

        // Every frame's offset from the first must be a representable Duration
        if let Some(first) = frames.first().map(|f| f.timestamp) {
            for frame in &frames {
                replay_offset(first, frame.timestamp)?;
            }
        }

        Ok(ReplaySource {
            frames: frames.into(),
            origin: None,
        })
    }

    /// Load a replay file
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        let file: ReplayFile = serde_json::from_str(&content)?;
        debug!("Loaded {} replay frames from {}", file.frames.len(), path.display());
        Self::from_frames(file.frames)
    }

    /// Frames not yet delivered
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn due_at(&mut self, timestamp: f64) -> Result<Instant, SourceError> {
        let (start, first_ts) = *self.origin.get_or_insert((Instant::now(), timestamp));
        let offset = replay_offset(first_ts, timestamp)?;
        start
            .checked_add(offset)
            .ok_or_else(|| SourceError::Schedule(format!("replay frame at {timestamp}s")))
    }
}

/// Delay of a frame after the first one; earlier frames play immediately
fn replay_offset(first_ts: f64, timestamp: f64) -> Result<Duration, SourceError> {
    Duration::try_from_secs_f64((timestamp - first_ts).max(0.0))
        .map_err(|_| SourceError::Parse(format!("frame timestamp out of range: {timestamp}")))
}

impl PoseSource for ReplaySource {
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<FrameSample>, SourceError> {
        let timestamp = match self.frames.front() {
            Some(frame) => frame.timestamp,
            None => {
                // Exhausted: behave like a stalled camera
                thread::sleep(timeout);
                return Ok(None);
            }
        };

        let due = self.due_at(timestamp)?;
        let now = Instant::now();
        if due > now {
            let wait = due - now;
            if wait > timeout {
                thread::sleep(timeout);
                return Ok(None);
            }
            thread::sleep(wait);
        }

        Ok(self.frames.pop_front())
    }
}
