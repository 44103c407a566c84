//! PERCLOS (percentage of eye closure) accumulation

/// Closed-eye frame counter for one pass
#[derive(Debug, Clone, Default)]
pub struct PerclosAccumulator {
    closed_frames: u64,
    valid_frames: u64,
    current_closed_run: u64,
    max_closed_run: u64,
}

impl PerclosAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one valid frame
    pub fn record(&mut self, is_eye_closed: bool) {
        self.valid_frames += 1;
        if is_eye_closed {
            self.closed_frames += 1;
            self.current_closed_run += 1;
        } else {
            self.max_closed_run = self.max_closed_run.max(self.current_closed_run);
            self.current_closed_run = 0;
        }
    }

    pub fn valid_frames(&self) -> u64 {
        self.valid_frames
    }

    pub fn closed_frames(&self) -> u64 {
        self.closed_frames
    }

    /// Length of the closed-eye run ending at the latest frame
    pub fn current_closed_run(&self) -> u64 {
        self.current_closed_run
    }

    /// Longest closed-eye run, including one still open at the latest frame
    pub fn max_closed_run(&self) -> u64 {
        self.max_closed_run.max(self.current_closed_run)
    }

    /// Closed frames over valid frames, 0 when nothing was recorded
    pub fn perclos(&self) -> f64 {
        if self.valid_frames == 0 {
            0.0
        } else {
            self.closed_frames as f64 / self.valid_frames as f64
        }
    }

    /// Score for the accumulated ratio
    pub fn score(&self) -> f64 {
        perclos_score(self.perclos())
    }
}

/// Piecewise PERCLOS-to-score mapping
pub fn perclos_score(perclos: f64) -> f64 {
    if perclos >= 0.30 {
        0.8 + (perclos - 0.30)
    } else if perclos >= 0.15 {
        0.4 + ((perclos - 0.15) / 0.15) * 0.4
    } else {
        perclos * 2.0
    }
}
