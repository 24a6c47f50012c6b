//! Game Clock
//!
//! Period and remaining-time bookkeeping. Pure state, no game logic.

use serde::{Deserialize, Serialize};

pub const REGULATION_QUARTERS: u8 = 4;
pub const QUARTER_SECONDS: u32 = 720;
pub const OVERTIME_SECONDS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    /// 1-4 in regulation, 4 + ot_period in overtime
    pub quarter: u8,
    pub seconds_left: u32,
    pub is_overtime: bool,
    pub ot_period: u8,
    /// Seconds consumed so far in the current period
    consumed: u32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self { quarter: 1, seconds_left: QUARTER_SECONDS, is_overtime: false, ot_period: 0, consumed: 0 }
    }

    /// Run the clock. Returns the seconds actually taken off, which is less
    /// than requested when the period runs out.
    pub fn consume(&mut self, seconds: u32) -> u32 {
        let taken = seconds.min(self.seconds_left);
        self.seconds_left -= taken;
        self.consumed += taken;
        taken
    }

    pub fn is_quarter_over(&self) -> bool {
        self.seconds_left == 0
    }

    /// Regulation only: Q1 -> Q2 -> Q3 -> Q4.
    pub fn start_next_quarter(&mut self) {
        debug_assert!(!self.is_overtime && self.quarter < REGULATION_QUARTERS);
        if self.is_overtime || self.quarter >= REGULATION_QUARTERS {
            return;
        }
        self.quarter += 1;
        self.seconds_left = QUARTER_SECONDS;
        self.consumed = 0;
    }

    pub fn start_overtime(&mut self) {
        self.ot_period += 1;
        self.is_overtime = true;
        self.quarter = REGULATION_QUARTERS + self.ot_period;
        self.seconds_left = OVERTIME_SECONDS;
        self.consumed = 0;
    }

    /// Put the clock at an arbitrary point (for testing)
    #[doc(hidden)]
    pub fn jump_to(&mut self, quarter: u8, seconds_left: u32) {
        self.quarter = quarter.max(1);
        self.is_overtime = self.quarter > REGULATION_QUARTERS;
        self.ot_period = self.quarter.saturating_sub(REGULATION_QUARTERS);
        self.seconds_left = seconds_left.min(self.period_length());
        self.consumed = self.period_length() - self.seconds_left;
    }

    pub fn period_length(&self) -> u32 {
        if self.is_overtime {
            OVERTIME_SECONDS
        } else {
            QUARTER_SECONDS
        }
    }

    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    /// "M:SS"
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.seconds_left / 60, self.seconds_left % 60)
    }

    /// "Q1".."Q4", "OT1", "OT2", ...
    pub fn period_label(&self) -> String {
        if self.is_overtime {
            format!("OT{}", self.ot_period)
        } else {
            format!("Q{}", self.quarter)
        }
    }
}
