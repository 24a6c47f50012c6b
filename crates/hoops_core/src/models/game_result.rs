//! Game Result Data Structures
//!
//! Output of one simulated game. Season aggregation, box-score pages and the
//! live viewer all read this shape, so field names are part of the contract.
//!
//! ```text
//!  GameEngine ──► result_builder ──► GameResult
//!                                      ├─► home_score / away_score
//!                                      ├─► quarter_scores (4 + one slot per OT)
//!                                      ├─► events (full play-by-play)
//!                                      ├─► home_players / away_players (box score)
//!                                      └─► is_overtime, final_momentum, total_possessions
//! ```

use serde::{Deserialize, Serialize};

use super::box_score::PlayerStatLine;
use super::events::GameEvent;
use super::team::TeamSide;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuarterScores {
    pub home: Vec<u16>,
    pub away: Vec<u16>,
}

impl QuarterScores {
    pub fn regulation() -> Self {
        Self { home: vec![0; 4], away: vec![0; 4] }
    }

    pub fn side(&self, side: TeamSide) -> &[u16] {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn total(&self, side: TeamSide) -> u16 {
        self.side(side).iter().sum()
    }

    pub fn periods(&self) -> usize {
        self.home.len()
    }
}

/// Summed box score for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamTotals {
    pub points: u16,
    pub fgm: u16,
    pub fga: u16,
    pub tpm: u16,
    pub tpa: u16,
    pub ftm: u16,
    pub fta: u16,
    pub rebounds: u16,
    pub assists: u16,
    pub steals: u16,
    pub blocks: u16,
    pub turnovers: u16,
    pub fouls: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u16,
    pub away_score: u16,
    pub quarter_scores: QuarterScores,
    pub events: Vec<GameEvent>,
    pub home_players: Vec<PlayerStatLine>,
    pub away_players: Vec<PlayerStatLine>,
    pub is_overtime: bool,
    pub overtime_periods: u8,
    pub final_momentum: f32,
    pub total_possessions: u32,
    pub seed: u64,
    #[serde(default)]
    pub is_playoff: bool,
}

impl GameResult {
    pub fn score(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn players(&self, side: TeamSide) -> &[PlayerStatLine] {
        match side {
            TeamSide::Home => &self.home_players,
            TeamSide::Away => &self.away_players,
        }
    }

    /// `None` only for an unfinished game snapshot that is still tied.
    pub fn winner(&self) -> Option<TeamSide> {
        use std::cmp::Ordering;
        match self.home_score.cmp(&self.away_score) {
            Ordering::Greater => Some(TeamSide::Home),
            Ordering::Less => Some(TeamSide::Away),
            Ordering::Equal => None,
        }
    }

    pub fn margin(&self) -> u16 {
        self.home_score.abs_diff(self.away_score)
    }

    pub fn combined_points(&self) -> u16 {
        self.home_score + self.away_score
    }

    pub fn team_totals(&self, side: TeamSide) -> TeamTotals {
        self.players(side).iter().fold(TeamTotals::default(), |mut t, p| {
            t.points += p.points;
            t.fgm += p.fgm;
            t.fga += p.fga;
            t.tpm += p.tpm;
            t.tpa += p.tpa;
            t.ftm += p.ftm;
            t.fta += p.fta;
            t.rebounds += p.rebounds;
            t.assists += p.assists;
            t.steals += p.steals;
            t.blocks += p.blocks;
            t.turnovers += p.turnovers;
            t.fouls += p.fouls;
            t
        })
    }

    pub fn player(&self, player_id: &str) -> Option<&PlayerStatLine> {
        self.home_players
            .iter()
            .chain(self.away_players.iter())
            .find(|p| p.player_id == player_id)
    }
}
