//! Momentum Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Momentum shift per point scored
    pub per_point: f32,
    /// Momentum is clamped to [-limit, limit]
    pub limit: f32,
    /// Multiplier applied at the end of every possession
    pub possession_decay: f32,
    pub quarter_break_damping: f32,
    pub timeout_damping: f32,

    // === Scoring runs ===
    /// Smallest run that gets a narrative event
    pub run_threshold: u16,
    /// Runs are announced at every multiple of this once past the threshold
    pub run_step: u16,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            per_point: 0.3,
            limit: 10.0,
            possession_decay: 0.97,
            quarter_break_damping: 0.5,
            timeout_damping: 0.5,

            run_threshold: 8,
            run_step: 4,
        }
    }
}
