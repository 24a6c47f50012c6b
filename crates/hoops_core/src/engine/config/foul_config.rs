//! Foul Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoulConfig {
    /// Flat chance a foul occurs on a live possession
    pub foul_chance: f32,
    /// Share of fouls that are shooting fouls
    pub shooting_foul_share: f32,
    /// Chance the trailing defense fouls on purpose during fouling time
    pub intentional_foul_chance: f32,
    /// Personal fouls that disqualify a player
    pub foul_out_limit: u8,
}

impl Default for FoulConfig {
    fn default() -> Self {
        Self {
            foul_chance: 0.18,
            shooting_foul_share: 0.52,
            intentional_foul_chance: 0.80,
            foul_out_limit: 6,
        }
    }
}
