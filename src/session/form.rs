//! Form score tracking with exponential moving average
//!
//! Features:
//! - Full per-frame percentage history (the session average uses all of it)
//! - EMA for a live, smoothed readout
//! - Peak score

/// Tracks form percentages for one session
#[derive(Clone, Debug)]
pub struct FormTracker {
    /// Every observed percentage, in arrival order
    history: Vec<f64>,
    /// Running sum of `history`
    total: f64,
    /// EMA score (alpha = 0.1), seeded by the first sample
    ema_score: Option<f64>,
    /// EMA decay factor
    ema_alpha: f64,
    /// Highest score seen
    peak: f64,
}

impl FormTracker {
    pub fn new() -> Self {
        FormTracker {
            history: Vec::new(),
            total: 0.0,
            ema_score: None,
            ema_alpha: 0.1,
            peak: 0.0,
        }
    }

    /// Record one frame's percentage
    pub fn record(&mut self, percentage: f64) {
        self.history.push(percentage);
        self.total += percentage;
        self.peak = self.peak.max(percentage);

        self.ema_score = Some(match self.ema_score {
            Some(ema) => self.ema_alpha * percentage + (1.0 - self.ema_alpha) * ema,
            None => percentage,
        });
    }

    /// Mean over the full history; 0 when nothing was recorded
    pub fn average(&self) -> f64 {
        if self.history.is_empty() {
            0.0
        } else {
            self.total / self.history.len() as f64
        }
    }

    /// Smoothed live score; 0 when nothing was recorded
    pub fn ema(&self) -> f64 {
        self.ema_score.unwrap_or(0.0)
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }
}

impl Default for FormTracker {
    fn default() -> Self {
        Self::new()
    }
}
