//! Game Setup
//!
//! Inputs handed to the engine by the rotation/usage/chemistry/coach layers.
//! The engine takes ownership of a `GameSetup` and mutates the rotation
//! entries in place for the duration of one game.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::player::Player;
use super::team::{Team, TeamSide};
use crate::error::{Result, SimError};

/// Coaching scalars for one team.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoachModifiers {
    /// Added to every shooter's archetype three-point rate
    #[serde(default)]
    pub three_pt_rate_modifier: f32,
    /// Probability-unit penalty applied to the opponent's shots and turnovers
    #[serde(default)]
    pub defense_modifier: f32,
}

/// One rostered player's participation record for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationEntry {
    pub player: Player,
    pub is_starter: bool,
    /// Assigned minutes. Only gates eligibility: zero means the player never
    /// enters the game, any positive value makes them available. Playing
    /// time itself follows fatigue-driven substitutions.
    pub minutes_budget: f32,
    /// Context-adjusted rating used for all probability calculations
    pub effective_rating: f32,
    /// Relative shot-selection weight
    #[serde(default)]
    pub usage_share: f32,

    // Runtime fields, reset by the engine at game start
    #[serde(default)]
    pub on_court: bool,
    #[serde(default)]
    pub fatigue: f32,
    #[serde(default)]
    pub fouls: u8,
    #[serde(default)]
    pub fouled_out: bool,
    #[serde(default)]
    pub possessions_on_court: u32,
}

impl RotationEntry {
    pub fn new(player: Player, is_starter: bool, minutes_budget: f32, effective_rating: f32) -> Self {
        Self {
            player,
            is_starter,
            minutes_budget,
            effective_rating,
            usage_share: 0.0,
            on_court: false,
            fatigue: 0.0,
            fouls: 0,
            fouled_out: false,
            possessions_on_court: 0,
        }
    }

    pub fn with_usage(mut self, usage_share: f32) -> Self {
        self.usage_share = usage_share;
        self
    }

    /// Can this player be on the floor at all?
    pub fn is_eligible(&self) -> bool {
        self.minutes_budget > 0.0 && !self.fouled_out
    }

    /// Put the entry back into its pre-tip state.
    pub(crate) fn reset_for_game(&mut self) {
        self.on_court = self.is_starter && self.is_eligible();
        self.fatigue = 0.0;
        self.fouls = 0;
        self.fouled_out = false;
        self.possessions_on_court = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSetup {
    pub team: Team,
    pub rotation: Vec<RotationEntry>,
    /// Chemistry scalar centred on 0.0 (negative hurts, positive helps)
    #[serde(default)]
    pub chemistry: f32,
    #[serde(default)]
    pub coach: CoachModifiers,
}

impl TeamSetup {
    pub fn new(team: Team, rotation: Vec<RotationEntry>) -> Self {
        Self { team, rotation, chemistry: 0.0, coach: CoachModifiers::default() }
    }

    pub fn validate(&self, side: TeamSide) -> Result<()> {
        if self.rotation.is_empty() {
            return Err(SimError::rotation(side, "rotation is empty"));
        }
        if !self.rotation.iter().any(|e| e.minutes_budget > 0.0) {
            return Err(SimError::rotation(side, "no player has assigned minutes"));
        }

        let mut seen = HashSet::new();
        for entry in &self.rotation {
            if !seen.insert(entry.player.id.as_str()) {
                return Err(SimError::rotation(
                    side,
                    format!("duplicate player id {}", entry.player.id),
                ));
            }
            if !entry.usage_share.is_finite() || entry.usage_share < 0.0 {
                return Err(SimError::rotation(
                    side,
                    format!("usage share for {} must be finite and >= 0", entry.player.id),
                ));
            }
            if !entry.effective_rating.is_finite() {
                return Err(SimError::rotation(
                    side,
                    format!("effective rating for {} is not finite", entry.player.id),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSetup {
    pub home: TeamSetup,
    pub away: TeamSetup,
    #[serde(default)]
    pub is_playoff: bool,
}

impl GameSetup {
    pub fn new(home: TeamSetup, away: TeamSetup) -> Self {
        Self { home, away, is_playoff: false }
    }

    pub fn validate(&self) -> Result<()> {
        self.home.validate(TeamSide::Home)?;
        self.away.validate(TeamSide::Away)
    }

    pub fn team(&self, side: TeamSide) -> &TeamSetup {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}
