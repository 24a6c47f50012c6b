//! Game Engine
//!
//! Owns everything one game needs: both rotations, the stat lines, the game
//! state and a seeded RNG. Nothing is shared between engines, so independent
//! games can run on separate threads.
//!
//! ## Driving a game
//! - `step()`: one resolver call (a possession or a period transition)
//! - `run_to_completion()` / `resolve()`: batch mode
//! - `result()`: snapshot at any point, never advances the game

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::SimConfig;
use super::game_state::GameState;
use super::substitutions::ensure_five_on_court;
use crate::error::{Result, SimError};
use crate::models::{
    EventDetails, EventType, GameEvent, GameResult, GameSetup, PlayerStatLine, RotationEntry, TeamSetup,
    TeamSide,
};

/// One side's rotation plus its box score, index-aligned.
#[derive(Debug, Clone)]
pub(crate) struct SideRuntime {
    pub(crate) setup: TeamSetup,
    pub(crate) stats: Vec<PlayerStatLine>,
}

impl SideRuntime {
    fn new(mut setup: TeamSetup, side: TeamSide) -> Self {
        for entry in setup.rotation.iter_mut() {
            entry.reset_for_game();
        }
        ensure_five_on_court(&mut setup.rotation);

        let stats = setup
            .rotation
            .iter()
            .map(|e| {
                let mut line = PlayerStatLine::new(e.player.id.as_str(), e.player.name.as_str(), e.player.position, side);
                line.games_started = u8::from(e.on_court);
                line
            })
            .collect();
        Self { setup, stats }
    }

    pub(crate) fn on_court(&self) -> impl Iterator<Item = &RotationEntry> + '_ {
        self.setup.rotation.iter().filter(|e| e.on_court)
    }
}

pub struct GameEngine {
    pub(super) rng: ChaCha8Rng,
    seed: u64,
    pub(crate) config: SimConfig,
    pub(crate) sides: [SideRuntime; 2],
    pub(crate) state: GameState,
    pub(super) is_playoff: bool,
}

impl GameEngine {
    /// Validate the matchup and config, seat the starters and jump the ball.
    pub fn new(setup: GameSetup, config: SimConfig, seed: u64) -> Result<Self> {
        setup.validate()?;
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let tip_winner = jump_ball(&mut rng);

        let GameSetup { home, away, is_playoff } = setup;
        let mut state = GameState::new(
            home.team.name.as_str(),
            away.team.name.as_str(),
            tip_winner,
            config.rules.timeouts_per_team,
        );
        state.push_event(EventType::Tipoff, Some(tip_winner), None);
        debug!(seed, home = %home.team.name, away = %away.team.name, ?tip_winner, "tip-off");

        Ok(Self {
            rng,
            seed,
            config,
            sides: [SideRuntime::new(home, TeamSide::Home), SideRuntime::new(away, TeamSide::Away)],
            state,
            is_playoff,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    pub fn team(&self, side: TeamSide) -> &TeamSetup {
        &self.sides[side.index()].setup
    }

    pub fn rotation(&self, side: TeamSide) -> &[RotationEntry] {
        &self.sides[side.index()].setup.rotation
    }

    /// Running stat lines (minutes are only filled in by `result()`)
    pub fn stats(&self, side: TeamSide) -> &[PlayerStatLine] {
        &self.sides[side.index()].stats
    }

    /// Resolve one possession or period transition. Returns the events it
    /// produced; empty once the game is complete.
    pub fn step(&mut self) -> &[GameEvent] {
        let before = self.state.events.len();
        if !self.state.is_complete {
            self.resolve_possession();
        }
        &self.state.events[before..]
    }

    pub fn run_to_completion(&mut self) {
        while !self.state.is_complete {
            self.resolve_possession();
        }
    }

    /// Play the rest of the game and hand back the result.
    pub fn resolve(mut self) -> GameResult {
        self.run_to_completion();
        self.result()
    }

    /// Strategic pause: damps momentum toward zero, no clock runs.
    pub fn call_timeout(&mut self, side: TeamSide) -> Result<()> {
        if self.state.is_complete {
            return Err(SimError::GameComplete);
        }
        let left = &mut self.state.timeouts[side.index()];
        if *left == 0 {
            return Err(SimError::NoTimeoutsRemaining { side });
        }
        *left -= 1;
        self.state.momentum.damp(self.config.momentum.timeout_damping);

        let details = self.state.scored_details(EventDetails::default());
        self.state.push_event(EventType::Timeout, Some(side), Some(details));
        debug!(?side, remaining = self.state.timeouts_left(side), "timeout");
        Ok(())
    }

    /// Jump to a game situation (for testing). Scores are booked in the
    /// first quarter so period totals stay consistent.
    #[doc(hidden)]
    pub fn force_situation(&mut self, quarter: u8, seconds_left: u32, home_score: u16, away_score: u16, offense: TeamSide) {
        self.state.clock.jump_to(quarter, seconds_left);
        let periods = (self.state.clock.quarter as usize).max(4);
        for (side, score) in [(TeamSide::Home, home_score), (TeamSide::Away, away_score)] {
            let mut slots = vec![0; periods];
            slots[0] = score;
            match side {
                TeamSide::Home => {
                    self.state.home_score = score;
                    self.state.quarter_scores.home = slots;
                }
                TeamSide::Away => {
                    self.state.away_score = score;
                    self.state.quarter_scores.away = slots;
                }
            }
        }
        self.state.offense = offense;
        self.state.fast_break = false;
    }
}

pub(crate) fn jump_ball<R: Rng + ?Sized>(rng: &mut R) -> TeamSide {
    if rng.gen_bool(0.5) {
        TeamSide::Home
    } else {
        TeamSide::Away
    }
}

/// Convenience wrapper: build an engine and play the whole game.
pub fn simulate_game(setup: GameSetup, config: SimConfig, seed: u64) -> Result<GameResult> {
    Ok(GameEngine::new(setup, config, seed)?.resolve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures;
    use crate::engine::substitutions::on_court_count;

    fn engine(seed: u64) -> GameEngine {
        GameEngine::new(fixtures::balanced_setup(75.0), SimConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_new_seats_five_and_logs_tipoff() {
        let e = engine(1);
        for side in TeamSide::BOTH {
            assert_eq!(on_court_count(e.rotation(side)), 5);
            assert_eq!(e.stats(side).iter().filter(|l| l.games_started == 1).count(), 5);
        }
        assert_eq!(e.state().events.len(), 1);
        assert_eq!(e.state().events[0].event_type, EventType::Tipoff);
        assert_eq!(e.state().offense, e.state().tip_winner);
    }

    #[test]
    fn test_new_rejects_invalid_setup() {
        let mut setup = fixtures::balanced_setup(75.0);
        setup.away.rotation.clear();
        assert!(matches!(
            GameEngine::new(setup, SimConfig::default(), 1),
            Err(SimError::InvalidRotation { side: TeamSide::Away, .. })
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut cfg = SimConfig::default();
        cfg.substitution.check_interval = 0;
        assert!(GameEngine::new(fixtures::balanced_setup(75.0), cfg, 1).is_err());
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = engine(42).resolve();
        let b = engine(42).resolve();
        assert_eq!(a, b);
        let c = engine(43).resolve();
        assert_ne!(a.events, c.events);
    }

    #[test]
    fn test_step_returns_only_new_events() {
        let mut e = engine(5);
        let first: Vec<GameEvent> = e.step().to_vec();
        assert!(!first.is_empty());
        assert!(first.iter().all(|ev| ev.event_type != EventType::Tipoff));
        assert_eq!(e.state().possessions, 1);
    }

    #[test]
    fn test_step_after_completion_is_empty() {
        let mut e = engine(8);
        e.run_to_completion();
        let len = e.state().events.len();
        assert!(e.step().is_empty());
        assert_eq!(e.state().events.len(), len);
    }

    #[test]
    fn test_timeouts_run_out() {
        let mut e = engine(2);
        for _ in 0..7 {
            e.call_timeout(TeamSide::Home).unwrap();
        }
        assert!(matches!(
            e.call_timeout(TeamSide::Home),
            Err(SimError::NoTimeoutsRemaining { side: TeamSide::Home })
        ));
        assert_eq!(e.state().timeouts_left(TeamSide::Away), 7);
    }

    #[test]
    fn test_timeout_damps_momentum_without_clock() {
        let mut e = engine(2);
        e.state.momentum = crate::engine::momentum::Momentum::with_value(6.0);
        let clock_before = e.state().clock.clone();
        e.call_timeout(TeamSide::Away).unwrap();
        assert!((e.state().momentum.value() - 3.0).abs() < 1e-6);
        assert_eq!(e.state().clock, clock_before);
    }

    #[test]
    fn test_timeout_after_completion_fails() {
        let mut e = engine(4);
        e.run_to_completion();
        assert!(matches!(e.call_timeout(TeamSide::Away), Err(SimError::GameComplete)));
    }
}
