//! # hoops_core - Possession-by-possession Basketball Simulation
//!
//! Simulates one game at a time from already-built rotations and produces
//! the full play-by-play, quarter scores and box score.
//!
//! ## Features
//! - Clock-driven: possessions take game time from a pace model, the game
//!   ends when the clock does (with overtime on a tie)
//! - Deterministic: same setup + config + seed = same game
//! - Batch (`GameEngine::resolve`) and live stepping (`LiveGame::step`)
//! - JSON API for hosts that only exchange strings
//!
//! ## Example
//! ```rust
//! use hoops_core::engine::{fixtures, GameEngine, SimConfig};
//!
//! let setup = fixtures::balanced_setup(75.0);
//! let result = GameEngine::new(setup, SimConfig::default(), 7).unwrap().resolve();
//! assert_eq!(result.home_score, result.quarter_scores.home.iter().sum::<u16>());
//! assert_ne!(result.home_score, result.away_score);
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_game_json, GameRequest};
pub use engine::{simulate_game, GameEngine, LiveGame, LiveSnapshot, SimConfig};
pub use error::{Result, SimError};
pub use models::{GameEvent, GameResult, GameSetup, PlayerStatLine, RotationEntry, TeamSetup, TeamSide};
