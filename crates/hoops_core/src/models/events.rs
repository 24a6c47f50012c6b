use serde::{Deserialize, Serialize};

use super::team::TeamSide;

/// One entry in the append-only play-by-play log.
///
/// Log order is possession order, which is also chronological.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Acting team. `None` for neutral events (period breaks, game end).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<TeamSide>,
    /// 1-4 for regulation, 5+ for overtime periods
    pub quarter: u8,
    /// Game clock at the time of the event, "M:SS"
    pub clock: String,
    /// Possession counter value when the event was logged
    pub possession: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EventDetails>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Tipoff,
    MadeShot,
    MissedShot,
    FreeThrows,
    Turnover,
    Foul,
    ShootingFoul,
    IntentionalFoul,
    FoulOut,
    Rebound,
    Substitution,
    /// Narrative-only scoring run marker, no effect on the score
    Run,
    Timeout,
    QuarterEnd,
    OvertimeStart,
    GameEnd,
}

impl EventType {
    pub fn is_scoring(self) -> bool {
        matches!(self, EventType::MadeShot | EventType::FreeThrows)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    TwoPoint,
    ThreePoint,
}

impl ShotType {
    pub fn points(self) -> u8 {
        match self {
            ShotType::TwoPoint => 2,
            ShotType::ThreePoint => 3,
        }
    }

    /// Free throws awarded on a shooting foul
    pub fn foul_shots(self) -> u8 {
        self.points()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EventDetails {
    /// Primary actor name (shooter, fouler, rebounder, ball handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steal_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<String>,
    /// Player who drew the foul
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fouled_player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offensive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_out: Option<String>,
    /// Current run total for `Run` events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_points: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_overtime: Option<bool>,
}

impl EventDetails {
    pub fn player(name: impl Into<String>) -> Self {
        Self { player: Some(name.into()), ..Default::default() }
    }

    pub fn with_score(mut self, home: u16, away: u16) -> Self {
        self.home_score = Some(home);
        self.away_score = Some(away);
        self
    }
}

impl GameEvent {
    pub fn player_name(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.player.as_deref())
    }

    /// Points this event put on the board
    pub fn points_scored(&self) -> u8 {
        match self.event_type {
            EventType::MadeShot => self.details.as_ref().and_then(|d| d.points).unwrap_or(0),
            EventType::FreeThrows => self.details.as_ref().and_then(|d| d.made).unwrap_or(0),
            _ => 0,
        }
    }
}
