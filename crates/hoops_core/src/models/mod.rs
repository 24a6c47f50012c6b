pub mod box_score;
pub mod events;
pub mod game_result;
pub mod game_setup;
pub mod player;
pub mod team;

pub use box_score::PlayerStatLine;
pub use events::{EventDetails, EventType, GameEvent, ShotType};
pub use game_result::{GameResult, QuarterScores, TeamTotals};
pub use game_setup::{CoachModifiers, GameSetup, RotationEntry, TeamSetup};
pub use player::{Player, Position};
pub use team::{Team, TeamSide, Tier};
