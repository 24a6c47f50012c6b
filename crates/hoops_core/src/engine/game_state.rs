//! Game State
//!
//! Everything that changes during one game except the rotations and stat
//! lines. Owned exclusively by a single `GameEngine`.

use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::config::RulesConfig;
use super::momentum::{Momentum, ScoringRuns};
use crate::models::{EventDetails, EventType, GameEvent, QuarterScores, TeamSide};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub quarter_scores: QuarterScores,
    pub clock: GameClock,
    /// Side with the ball
    pub offense: TeamSide,
    pub momentum: Momentum,
    pub runs: ScoringRuns,
    /// [home, away]
    pub timeouts: [u8; 2],
    pub possessions: u32,
    pub is_complete: bool,
    /// Next possession starts in transition
    pub fast_break: bool,
    /// Winner of the opening tip; decides who starts quarters 2-4
    pub tip_winner: TeamSide,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>, tip_winner: TeamSide, timeouts: u8) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: 0,
            away_score: 0,
            quarter_scores: QuarterScores::regulation(),
            clock: GameClock::new(),
            offense: tip_winner,
            momentum: Momentum::default(),
            runs: ScoringRuns::default(),
            timeouts: [timeouts; 2],
            possessions: 0,
            is_complete: false,
            fast_break: false,
            tip_winner,
            events: Vec::new(),
        }
    }

    pub fn score(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    /// `side`'s score minus the opponent's
    pub fn margin_for(&self, side: TeamSide) -> i32 {
        self.score(side) as i32 - self.score(side.opponent()) as i32
    }

    pub fn is_tied(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Credit points to the running score and the current period slot.
    pub fn add_points(&mut self, side: TeamSide, points: u16) {
        let slot = (self.clock.quarter as usize).saturating_sub(1);
        let (score, periods) = match side {
            TeamSide::Home => (&mut self.home_score, &mut self.quarter_scores.home),
            TeamSide::Away => (&mut self.away_score, &mut self.quarter_scores.away),
        };
        *score += points;
        if periods.len() <= slot {
            periods.resize(slot + 1, 0);
        }
        periods[slot] += points;
    }

    /// Late, close game where the trailing team fouls to stop the clock.
    pub fn is_fouling_time(&self, rules: &RulesConfig) -> bool {
        let margin = self.home_score.abs_diff(self.away_score);
        self.clock.quarter >= rules.fouling_min_quarter
            && self.clock.seconds_left <= rules.fouling_max_seconds_left
            && (rules.fouling_min_margin..=rules.fouling_max_margin).contains(&margin)
    }

    pub fn is_clutch(&self, rules: &RulesConfig) -> bool {
        self.clock.quarter >= rules.clutch_min_quarter
            && self.clock.seconds_left <= rules.clutch_max_seconds_left
            && self.home_score.abs_diff(self.away_score) <= rules.clutch_max_margin
    }

    pub fn timeouts_left(&self, side: TeamSide) -> u8 {
        self.timeouts[side.index()]
    }

    /// Append an event stamped with the current period, clock and possession.
    pub fn push_event(&mut self, event_type: EventType, side: Option<TeamSide>, details: Option<EventDetails>) {
        self.events.push(GameEvent {
            event_type,
            side,
            quarter: self.clock.quarter,
            clock: self.clock.display(),
            possession: self.possessions,
            details,
        });
    }

    /// Details pre-filled with the current score
    pub fn scored_details(&self, details: EventDetails) -> EventDetails {
        details.with_score(self.home_score, self.away_score)
    }
}
