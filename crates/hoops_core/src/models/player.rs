use serde::{Deserialize, Serialize};

/// Position archetype. Drives shot mix, assist and rebound weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    pub const ALL: [Position; 5] = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    /// Base overall rating (roughly 40-99, league average 75)
    pub rating: f32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position, rating: f32) -> Self {
        Self { id: id.into(), name: name.into(), position, rating }
    }
}
