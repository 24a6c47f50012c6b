//! Substitution / Fatigue Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// Mid-quarter check runs every N possessions
    pub check_interval: u32,

    // === Mid-quarter ===
    pub mid_quarter_fatigue: f32,
    /// Bench player must be at least this much fresher
    pub mid_quarter_margin: f32,
    /// Fraction of fatigue removed from the player coming off
    pub partial_reset: f32,

    // === Quarter break ===
    pub quarter_break_fatigue: f32,
    pub quarter_break_margin: f32,
    pub quarter_break_recovery: f32,

    // === Per possession ===
    pub fatigue_per_possession: f32,
    pub bench_recovery_per_possession: f32,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            check_interval: 8,

            mid_quarter_fatigue: 8.0,
            mid_quarter_margin: 3.0,
            partial_reset: 0.5,

            quarter_break_fatigue: 5.0,
            quarter_break_margin: 2.0,
            quarter_break_recovery: 4.0,

            fatigue_per_possession: 0.25,
            bench_recovery_per_possession: 0.1,
        }
    }
}
