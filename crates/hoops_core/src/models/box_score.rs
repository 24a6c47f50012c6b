use serde::{Deserialize, Serialize};

use super::player::Position;
use super::team::TeamSide;

/// Per-player box score line.
///
/// Shot counters are only ever touched through the `record_*` methods so
/// that made <= attempted holds for every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_id: String,
    pub name: String,
    pub position: Position,
    pub side: TeamSide,
    pub points: u16,
    pub fgm: u16,
    pub fga: u16,
    pub tpm: u16,
    pub tpa: u16,
    pub ftm: u16,
    pub fta: u16,
    pub rebounds: u16,
    pub offensive_rebounds: u16,
    pub assists: u16,
    pub steals: u16,
    pub blocks: u16,
    pub turnovers: u16,
    pub fouls: u16,
    /// Estimated after the game from on-court possession share
    pub minutes: f32,
    pub games_played: u8,
    pub games_started: u8,
}

impl PlayerStatLine {
    pub fn new(player_id: impl Into<String>, name: impl Into<String>, position: Position, side: TeamSide) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            position,
            side,
            points: 0,
            fgm: 0,
            fga: 0,
            tpm: 0,
            tpa: 0,
            ftm: 0,
            fta: 0,
            rebounds: 0,
            offensive_rebounds: 0,
            assists: 0,
            steals: 0,
            blocks: 0,
            turnovers: 0,
            fouls: 0,
            minutes: 0.0,
            games_played: 0,
            games_started: 0,
        }
    }

    pub fn record_field_goal(&mut self, made: bool, is_three: bool) {
        self.fga += 1;
        if is_three {
            self.tpa += 1;
        }
        if made {
            self.fgm += 1;
            if is_three {
                self.tpm += 1;
                self.points += 3;
            } else {
                self.points += 2;
            }
        }
    }

    pub fn record_free_throw(&mut self, made: bool) {
        self.fta += 1;
        if made {
            self.ftm += 1;
            self.points += 1;
        }
    }

    pub fn record_rebound(&mut self, offensive: bool) {
        self.rebounds += 1;
        if offensive {
            self.offensive_rebounds += 1;
        }
    }

    pub fn fg_pct(&self) -> f32 {
        pct(self.fgm, self.fga)
    }

    pub fn three_pct(&self) -> f32 {
        pct(self.tpm, self.tpa)
    }

    pub fn ft_pct(&self) -> f32 {
        pct(self.ftm, self.fta)
    }

    /// made <= attempted in every category
    pub fn is_consistent(&self) -> bool {
        self.fgm <= self.fga
            && self.tpm <= self.tpa
            && self.ftm <= self.fta
            && self.tpa <= self.fga
            && self.tpm <= self.fgm
            && self.offensive_rebounds <= self.rebounds
            && self.points == 2 * (self.fgm - self.tpm) + 3 * self.tpm + self.ftm
    }
}

fn pct(made: u16, attempted: u16) -> f32 {
    if attempted == 0 {
        0.0
    } else {
        made as f32 / attempted as f32
    }
}
