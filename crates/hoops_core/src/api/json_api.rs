//! JSON entry point for hosts that talk to the core over strings.
//!
//! ## Request (schema_version = 1)
//! ```json
//! {
//!   "schema_version": 1,
//!   "seed": 42,
//!   "home": { "team": {...}, "rotation": [...], "chemistry": 0.0, "coach": {...} },
//!   "away": { ... },
//!   "config": { "pace": { ... } },
//!   "is_playoff": false
//! }
//! ```
//! `config`, `chemistry`, `coach` and `is_playoff` are optional.
//!
//! ## Response
//! The serialized `GameResult`.

use serde::{Deserialize, Serialize};

use crate::engine::config::SimConfig;
use crate::engine::game_sim::simulate_game;
use crate::error::{Result, SimError};
use crate::models::{GameResult, GameSetup, TeamSetup};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home: TeamSetup,
    pub away: TeamSetup,
    #[serde(default)]
    pub config: Option<SimConfig>,
    #[serde(default)]
    pub is_playoff: bool,
}

impl GameRequest {
    /// Current-schema request with default config.
    pub fn new(home: TeamSetup, away: TeamSetup, seed: u64) -> Self {
        Self { schema_version: SCHEMA_VERSION, seed, home, away, config: None, is_playoff: false }
    }
}

pub fn simulate_game_request(request: GameRequest) -> Result<GameResult> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::SchemaVersion { found: request.schema_version, expected: SCHEMA_VERSION });
    }
    let GameRequest { seed, home, away, config, is_playoff, .. } = request;
    let mut setup = GameSetup::new(home, away);
    setup.is_playoff = is_playoff;
    simulate_game(setup, config.unwrap_or_default(), seed)
}

pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    let result = simulate_game_request(request)?;
    Ok(serde_json::to_string(&result)?)
}
