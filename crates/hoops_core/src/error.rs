use thiserror::Error;

use crate::models::TeamSide;

/// Errors raised at the boundaries of the simulation core.
///
/// Possession resolution itself never fails; these only come from setup
/// validation, config/JSON decoding and illegal live-game actions.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid rotation for {side:?}: {reason}")]
    InvalidRotation { side: TeamSide, reason: String },

    #[error("No timeouts remaining for {side:?}")]
    NoTimeoutsRemaining { side: TeamSide },

    #[error("Game is already complete")]
    GameComplete,

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    pub(crate) fn rotation(side: TeamSide, reason: impl Into<String>) -> Self {
        SimError::InvalidRotation { side, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
