//! Live Game Stepping API
//!
//! Wraps a `GameEngine` for "watch game" playback. The host decides when to
//! call `step()`; nothing in here knows about wall-clock time, speed or
//! pausing. Stopping early is just not calling `step()` again.

use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::game_sim::GameEngine;
use crate::error::{Result, SimError};
use crate::models::{GameEvent, GameResult, GameSetup, TeamSide};

/// Read-only view of a game in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub quarter: u8,
    /// "Q1".."Q4", "OT1"...
    pub period: String,
    /// "M:SS"
    pub clock: String,
    pub momentum: f32,
    pub home_timeouts: u8,
    pub away_timeouts: u8,
    pub offense: TeamSide,
    pub possessions: u32,
    pub is_clutch: bool,
    pub is_fouling_time: bool,
    pub is_complete: bool,
    pub home_on_court: Vec<String>,
    pub away_on_court: Vec<String>,
}

pub struct LiveGame {
    engine: GameEngine,
}

impl LiveGame {
    pub fn new(setup: GameSetup, config: SimConfig, seed: u64) -> Result<Self> {
        Ok(Self { engine: GameEngine::new(setup, config, seed)? })
    }

    /// Resolve exactly one possession (or period transition) and return the
    /// events it produced.
    pub fn step(&mut self) -> Result<Vec<GameEvent>> {
        if self.engine.is_complete() {
            return Err(SimError::GameComplete);
        }
        Ok(self.engine.step().to_vec())
    }

    pub fn state(&self) -> LiveSnapshot {
        let state = self.engine.state();
        let rules = &self.engine.config().rules;
        let on_court = |side: TeamSide| -> Vec<String> {
            self.engine.rotation(side).iter().filter(|e| e.on_court).map(|e| e.player.name.clone()).collect()
        };

        LiveSnapshot {
            home_team: state.home_team.clone(),
            away_team: state.away_team.clone(),
            home_score: state.home_score,
            away_score: state.away_score,
            quarter: state.clock.quarter,
            period: state.clock.period_label(),
            clock: state.clock.display(),
            momentum: state.momentum.value(),
            home_timeouts: state.timeouts_left(TeamSide::Home),
            away_timeouts: state.timeouts_left(TeamSide::Away),
            offense: state.offense,
            possessions: state.possessions,
            is_clutch: state.is_clutch(rules),
            is_fouling_time: state.is_fouling_time(rules),
            is_complete: state.is_complete,
            home_on_court: on_court(TeamSide::Home),
            away_on_court: on_court(TeamSide::Away),
        }
    }

    /// Play out the rest of the game in one call.
    pub fn finish(&mut self) -> GameResult {
        self.engine.run_to_completion();
        self.engine.result()
    }

    pub fn call_timeout(&mut self, side: TeamSide) -> Result<()> {
        self.engine.call_timeout(side)
    }

    pub fn result(&self) -> GameResult {
        self.engine.result()
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }
}
