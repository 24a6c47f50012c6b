//! Turnover Configuration

use serde::{Deserialize, Serialize};

use super::{ProbBounds, TierTable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverConfig {
    pub base_rate: TierTable<f32>,
    /// Multiplier on the defense modifier before it is added to the rate
    pub defense_weight: f32,
    pub bounds: ProbBounds,
    /// Chance a turnover is credited as a steal
    pub steal_chance: f32,
}

impl Default for TurnoverConfig {
    fn default() -> Self {
        Self {
            base_rate: TierTable::new(0.135, 0.14, 0.145),
            defense_weight: 0.5,
            bounds: ProbBounds::new(0.11, 0.16),
            steal_chance: 0.55,
        }
    }
}
