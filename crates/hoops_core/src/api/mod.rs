pub mod json_api;

pub use json_api::{simulate_game_json, simulate_game_request, GameRequest, SCHEMA_VERSION};
