//! Game Momentum System
//!
//! A single scalar shared by both sides:
//! - positive values favour the home team, negative the away team
//! - made baskets push it toward the scoring side in proportion to points
//! - every possession lets it decay toward zero
//! - quarter breaks and timeouts damp it harder
//!
//! Scoring runs are tracked alongside for the play-by-play narrative only.

use serde::{Deserialize, Serialize};

use super::config::MomentumConfig;
use crate::models::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Momentum {
    value: f32,
}

impl Momentum {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Momentum seen from one side (positive = in that side's favour)
    pub fn for_side(&self, side: TeamSide) -> f32 {
        if side.is_home() {
            self.value
        } else {
            -self.value
        }
    }

    pub fn apply_score(&mut self, side: TeamSide, points: u8, cfg: &MomentumConfig) {
        let shift = points as f32 * cfg.per_point;
        let signed = if side.is_home() { shift } else { -shift };
        self.value = (self.value + signed).clamp(-cfg.limit, cfg.limit);
    }

    /// Multiply toward zero. Used for per-possession decay, quarter breaks
    /// and timeouts.
    pub fn damp(&mut self, factor: f32) {
        self.value *= factor.clamp(0.0, 1.0);
    }

    /// Create momentum with specific value (for testing)
    #[doc(hidden)]
    pub fn with_value(value: f32) -> Self {
        Self { value }
    }
}

/// Consecutive points per side; reset when the other side scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringRuns {
    pub home: u16,
    pub away: u16,
}

impl ScoringRuns {
    pub fn current(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    /// Add points to `side`'s run. Returns the run total when it crosses a
    /// notable mark (threshold, then every `run_step` points).
    pub fn record(&mut self, side: TeamSide, points: u8, cfg: &MomentumConfig) -> Option<u16> {
        let (run, other) = match side {
            TeamSide::Home => (&mut self.home, &mut self.away),
            TeamSide::Away => (&mut self.away, &mut self.home),
        };
        *other = 0;
        let before = *run;
        *run = run.saturating_add(points as u16);

        let step = cfg.run_step.max(1);
        if *run >= cfg.run_threshold && (before < cfg.run_threshold || before / step < *run / step) {
            Some(*run)
        } else {
            None
        }
    }
}
