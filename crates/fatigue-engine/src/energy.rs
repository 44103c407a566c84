//! Energy slot
//!
//! Alertness modeled as a depleting resource: closed eyes and yawns drain it,
//! normal frames restore it. The pass score follows the lowest level reached.

use crate::config::EngineConfig;

/// Penalty/recovery accumulator for one pass
#[derive(Debug, Clone)]
pub struct EnergyTracker {
    current: f64,
    minimum_seen: f64,
    max: f64,
    penalty_eye_closed: f64,
    penalty_yawn: f64,
    penalty_consecutive_extra: f64,
    recovery_normal: f64,
}

impl EnergyTracker {
    /// Create a tracker at the configured starting energy
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            current: config.energy_initial,
            // Starts at the cap, so the initial value alone never counts as a low point
            minimum_seen: config.energy_max,
            max: config.energy_max,
            penalty_eye_closed: config.penalty_eye_closed,
            penalty_yawn: config.penalty_yawn,
            penalty_consecutive_extra: config.penalty_consecutive_closed_extra,
            recovery_normal: config.recovery_normal,
        }
    }

    /// Apply one frame.
    ///
    /// `in_closed_streak` is true on the second and later frame of a running
    /// closed-eye streak.
    pub fn update(&mut self, is_eye_closed: bool, is_yawning: bool, in_closed_streak: bool) {
        if is_eye_closed {
            self.current -= self.penalty_eye_closed;
            if in_closed_streak {
                self.current -= self.penalty_consecutive_extra;
            }
        } else if is_yawning {
            self.current -= self.penalty_yawn;
        } else {
            self.current += self.recovery_normal;
        }

        self.current = self.current.clamp(0.0, self.max);
        if self.current < self.minimum_seen {
            self.minimum_seen = self.current;
        }
    }

    /// Current energy
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Lowest energy reached during the pass
    pub fn minimum_seen(&self) -> f64 {
        self.minimum_seen
    }

    /// Energy-derived score: depth of the lowest point below the cap
    pub fn energy_score(&self) -> f64 {
        (self.max - self.minimum_seen) / self.max
    }
}
