//! Per-game seed derivation for batch runs.
//!
//! Uses `fxhash` (stable across Rust releases, unlike `DefaultHasher`): a
//! (base seed, game index) pair replays the same game on any toolchain.

/// Mixed into every hash so (0, 0) does not collapse to 0.
const SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

pub fn derive_game_seed(base_seed: u64, game_index: u64) -> u64 {
    fxhash::hash64(&(SEED_SALT, base_seed, game_index))
}
