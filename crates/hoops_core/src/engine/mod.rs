//! Simulation engine
//!
//! ```text
//! LiveGame / GameEngine::resolve
//!        │
//!        ▼
//!   controller ──► possession ──► pace
//!        │              │
//!        │              ├──► probability
//!        │              └──► substitutions
//!        ▼
//!   result_builder ──► GameResult
//! ```

pub mod clock;
pub mod config;
mod contracts;
mod controller;
pub mod fixtures;
pub mod game_sim;
pub mod game_state;
pub mod live_game;
pub mod momentum;
pub mod pace;
mod possession;
pub mod probability;
pub mod result_builder;
pub mod rotation;
pub mod seed;
pub mod substitutions;

pub use clock::GameClock;
pub use config::SimConfig;
pub use game_sim::{simulate_game, GameEngine};
pub use game_state::GameState;
pub use live_game::{LiveGame, LiveSnapshot};
pub use momentum::{Momentum, ScoringRuns};
pub use rotation::{
    default_fatigue_penalty, team_strength, ChemistryModel, Collaborators, CoachModel, DepthChartRotation,
    FatiguePenalty, NeutralChemistry, NeutralCoach, RatingUsage, RotationBuilder, RotationSlot, UsageCalculator,
};
pub use seed::derive_game_seed;
