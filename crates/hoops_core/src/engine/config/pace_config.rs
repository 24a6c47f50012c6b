//! Pace Configuration

use serde::{Deserialize, Serialize};

use super::{SecondsRange, TierTable};

/// Possession-length parameters, all in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceConfig {
    /// At or below this many seconds the possession takes the rest of the period
    pub force_end_threshold: u32,
    /// At or below this many seconds the buzzer range is used
    pub buzzer_threshold: u32,
    pub buzzer: SecondsRange,
    /// Offense leading in fouling time: the defense fouls almost immediately
    pub intentional_foul: SecondsRange,
    pub clock_milking: SecondsRange,
    pub fast_break: SecondsRange,
    pub half_court: SecondsRange,

    // === Clock milking window ===
    pub milking_min_quarter: u8,
    pub milking_min_margin: i32,
    /// Strictly below this many seconds left
    pub milking_max_seconds_left: u32,

    /// Added seconds per tier (lower tiers execute slower)
    pub tier_modifier: TierTable<f32>,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            force_end_threshold: 5,
            buzzer_threshold: 30,
            buzzer: SecondsRange::new(4.0, 12.0),
            intentional_foul: SecondsRange::new(2.0, 5.0),
            clock_milking: SecondsRange::new(18.0, 24.0),
            fast_break: SecondsRange::new(4.0, 9.0),
            half_court: SecondsRange::new(9.0, 19.0),

            milking_min_quarter: 4,
            milking_min_margin: 15,
            milking_max_seconds_left: 360,

            tier_modifier: TierTable::new(0.0, 1.0, 2.0),
        }
    }
}
