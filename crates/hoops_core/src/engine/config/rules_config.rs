//! Game Rules Configuration
//!
//! Late-game windows and per-game allowances.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub timeouts_per_team: u8,

    // === Fouling time ===
    pub fouling_min_quarter: u8,
    pub fouling_max_seconds_left: u32,
    pub fouling_min_margin: u16,
    pub fouling_max_margin: u16,

    // === Clutch ===
    pub clutch_min_quarter: u8,
    pub clutch_max_seconds_left: u32,
    pub clutch_max_margin: u16,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            timeouts_per_team: 7,

            fouling_min_quarter: 4,
            fouling_max_seconds_left: 120,
            fouling_min_margin: 3,
            fouling_max_margin: 10,

            clutch_min_quarter: 4,
            clutch_max_seconds_left: 300,
            clutch_max_margin: 5,
        }
    }
}
