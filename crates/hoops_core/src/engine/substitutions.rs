//! Player Substitution Logic
//!
//! Two fatigue-driven policies plus the "five on the floor" repair.
//!
//! ## Functions
//! - `advance_fatigue`: per-possession fatigue for players on court, recovery on the bench
//! - `mid_quarter_substitutions`: swaps exhausted players every few possessions
//! - `quarter_break_substitutions`: bigger reshuffle between periods
//! - `ensure_five_on_court`: activates the best eligible bench players until five play
//!
//! Players with zero assigned minutes or six fouls are never eligible, so the
//! repair step is what keeps a short rotation on the floor.

use super::config::SubstitutionConfig;
use super::game_sim::GameEngine;
use crate::models::{EventDetails, EventType, RotationEntry, TeamSide};

pub const PLAYERS_ON_COURT: usize = 5;

/// One lineup change. `player_out` is `None` when a player fills an empty spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub player_in: usize,
    pub player_out: Option<usize>,
}

pub fn on_court_count(rotation: &[RotationEntry]) -> usize {
    rotation.iter().filter(|e| e.on_court).count()
}

pub fn advance_fatigue(rotation: &mut [RotationEntry], cfg: &SubstitutionConfig) {
    for entry in rotation.iter_mut() {
        if entry.on_court {
            entry.fatigue += cfg.fatigue_per_possession;
            entry.possessions_on_court += 1;
        } else {
            entry.fatigue = (entry.fatigue - cfg.bench_recovery_per_possession).max(0.0);
        }
    }
}

/// Least-tired eligible bench player at or below `max_fatigue`.
/// Ties go to the higher effective rating.
fn freshest_bench(rotation: &[RotationEntry], max_fatigue: f32) -> Option<usize> {
    rotation
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.on_court && e.is_eligible() && e.fatigue <= max_fatigue)
        .min_by(|(_, a), (_, b)| {
            a.fatigue
                .total_cmp(&b.fatigue)
                .then_with(|| b.effective_rating.total_cmp(&a.effective_rating))
        })
        .map(|(idx, _)| idx)
}

pub fn mid_quarter_substitutions(rotation: &mut [RotationEntry], cfg: &SubstitutionConfig) -> Vec<Swap> {
    let mut swaps = Vec::new();
    let on_court: Vec<usize> = (0..rotation.len()).filter(|&i| rotation[i].on_court).collect();

    for out in on_court {
        let fatigue = rotation[out].fatigue;
        if fatigue <= cfg.mid_quarter_fatigue {
            continue;
        }
        if let Some(player_in) = freshest_bench(rotation, fatigue - cfg.mid_quarter_margin) {
            rotation[out].on_court = false;
            rotation[out].fatigue *= cfg.partial_reset;
            rotation[player_in].on_court = true;
            swaps.push(Swap { player_in, player_out: Some(out) });
        }
    }

    swaps.extend(ensure_five_on_court(rotation));
    swaps
}

pub fn quarter_break_substitutions(rotation: &mut [RotationEntry], cfg: &SubstitutionConfig) -> Vec<Swap> {
    let mut swaps = Vec::new();
    let mut on_court: Vec<usize> = (0..rotation.len()).filter(|&i| rotation[i].on_court).collect();
    on_court.sort_by(|&a, &b| rotation[b].fatigue.total_cmp(&rotation[a].fatigue));

    for out in on_court {
        let fatigue = rotation[out].fatigue;
        if fatigue <= cfg.quarter_break_fatigue {
            continue;
        }
        if let Some(player_in) = freshest_bench(rotation, fatigue - cfg.quarter_break_margin) {
            rotation[out].on_court = false;
            rotation[player_in].on_court = true;
            swaps.push(Swap { player_in, player_out: Some(out) });
        }
    }

    for entry in rotation.iter_mut().filter(|e| !e.on_court) {
        entry.fatigue = (entry.fatigue - cfg.quarter_break_recovery).max(0.0);
    }

    swaps.extend(ensure_five_on_court(rotation));
    swaps
}

/// Pull ineligible players off the floor, then activate the highest-rated
/// eligible bench players until five are on court or nobody is left.
pub fn ensure_five_on_court(rotation: &mut [RotationEntry]) -> Vec<Swap> {
    for entry in rotation.iter_mut() {
        if entry.on_court && !entry.is_eligible() {
            entry.on_court = false;
        }
    }

    let mut activated = Vec::new();
    while on_court_count(rotation) < PLAYERS_ON_COURT {
        let best = rotation
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.on_court && e.is_eligible())
            .max_by(|(ia, a), (ib, b)| {
                // Earlier rotation slot wins a rating tie
                a.effective_rating.total_cmp(&b.effective_rating).then_with(|| ib.cmp(ia))
            })
            .map(|(idx, _)| idx);
        let Some(idx) = best else { break };
        rotation[idx].on_court = true;
        activated.push(Swap { player_in: idx, player_out: None });
    }
    activated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubstitutionWindow {
    MidQuarter,
    QuarterBreak,
}

impl GameEngine {
    /// Run one substitution policy for `side` and log every change.
    pub(crate) fn run_substitutions(&mut self, side: TeamSide, window: SubstitutionWindow) {
        let cfg = &self.config.substitution;
        let rotation = &mut self.sides[side.index()].setup.rotation;
        let swaps = match window {
            SubstitutionWindow::MidQuarter => mid_quarter_substitutions(rotation, cfg),
            SubstitutionWindow::QuarterBreak => quarter_break_substitutions(rotation, cfg),
        };
        self.log_swaps(side, &swaps);
    }

    /// Repair a lineup after a foul-out.
    pub(crate) fn refill_lineup(&mut self, side: TeamSide) {
        let swaps = ensure_five_on_court(&mut self.sides[side.index()].setup.rotation);
        self.log_swaps(side, &swaps);
    }

    fn log_swaps(&mut self, side: TeamSide, swaps: &[Swap]) {
        for swap in swaps {
            let rotation = &self.sides[side.index()].setup.rotation;
            let details = EventDetails {
                player_in: Some(rotation[swap.player_in].player.name.clone()),
                player_out: swap.player_out.map(|i| rotation[i].player.name.clone()),
                ..Default::default()
            };
            tracing::trace!(?side, player_in = ?details.player_in, player_out = ?details.player_out, "substitution");
            self.state.push_event(EventType::Substitution, Some(side), Some(details));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Position};

    fn entry(id: &str, on_court: bool, fatigue: f32, minutes: f32, rating: f32) -> RotationEntry {
        let mut e = RotationEntry::new(Player::new(id, id, Position::SF, rating), on_court, minutes, rating);
        e.on_court = on_court;
        e.fatigue = fatigue;
        e
    }

    fn cfg() -> SubstitutionConfig {
        SubstitutionConfig::default()
    }

    fn full_rotation() -> Vec<RotationEntry> {
        let mut rotation: Vec<RotationEntry> =
            (0..5).map(|i| entry(&format!("s{i}"), true, 2.0, 32.0, 75.0)).collect();
        rotation.extend((0..5).map(|i| entry(&format!("b{i}"), false, 0.0, 16.0, 72.0)));
        rotation
    }

    #[test]
    fn test_advance_fatigue_splits_court_and_bench() {
        let mut rotation = full_rotation();
        rotation[7].fatigue = 0.05;
        advance_fatigue(&mut rotation, &cfg());
        assert!((rotation[0].fatigue - 2.25).abs() < 1e-6);
        assert_eq!(rotation[0].possessions_on_court, 1);
        assert_eq!(rotation[7].fatigue, 0.0);
        assert_eq!(rotation[7].possessions_on_court, 0);
    }

    #[test]
    fn test_mid_quarter_swaps_tired_player_for_fresher_bench() {
        let mut rotation = full_rotation();
        rotation[2].fatigue = 9.0;
        rotation[6].fatigue = 1.0;
        let swaps = mid_quarter_substitutions(&mut rotation, &cfg());
        assert_eq!(swaps, vec![Swap { player_in: 5, player_out: Some(2) }]);
        assert!(!rotation[2].on_court);
        assert!((rotation[2].fatigue - 4.5).abs() < 1e-6);
        assert_eq!(on_court_count(&rotation), 5);
    }

    #[test]
    fn test_mid_quarter_needs_fatigue_margin() {
        let mut rotation = full_rotation();
        rotation[0].fatigue = 9.0;
        for bench in rotation.iter_mut().skip(5) {
            bench.fatigue = 6.5;
        }
        assert!(mid_quarter_substitutions(&mut rotation, &cfg()).is_empty());
        assert!(rotation[0].on_court);
    }

    #[test]
    fn test_zero_minute_players_never_enter() {
        let mut rotation = full_rotation();
        for bench in rotation.iter_mut().skip(5) {
            bench.minutes_budget = 0.0;
        }
        rotation[1].fatigue = 20.0;
        assert!(mid_quarter_substitutions(&mut rotation, &cfg()).is_empty());
        assert!(rotation.iter().skip(5).all(|e| !e.on_court));
    }

    #[test]
    fn test_quarter_break_processes_most_tired_first_and_recovers_bench() {
        let mut rotation = full_rotation();
        rotation[0].fatigue = 6.0;
        rotation[1].fatigue = 10.0;
        for bench in rotation.iter_mut().skip(5) {
            bench.fatigue = 3.0;
        }
        rotation[9].fatigue = 0.5;
        let swaps = quarter_break_substitutions(&mut rotation, &cfg());
        // Most tired (index 1) gets the freshest bench player first
        assert_eq!(swaps[0], Swap { player_in: 9, player_out: Some(1) });
        assert_eq!(swaps[1].player_out, Some(0));
        assert_eq!(swaps.len(), 2);
        // Swapped-out player recovered on the bench
        assert!((rotation[1].fatigue - 6.0).abs() < 1e-6);
        assert_eq!(rotation[7].fatigue, 0.0);
        assert_eq!(on_court_count(&rotation), 5);
    }

    #[test]
    fn test_ensure_five_activates_highest_rated_eligible() {
        let mut rotation = vec![
            entry("a", true, 0.0, 30.0, 75.0),
            entry("b", false, 0.0, 10.0, 70.0),
            entry("c", false, 0.0, 10.0, 80.0),
            entry("d", false, 0.0, 0.0, 99.0),
        ];
        let swaps = ensure_five_on_court(&mut rotation);
        assert_eq!(swaps.iter().map(|s| s.player_in).collect::<Vec<_>>(), vec![2, 1]);
        assert!(!rotation[3].on_court);
        assert_eq!(on_court_count(&rotation), 3);
    }

    #[test]
    fn test_ensure_five_removes_fouled_out_player() {
        let mut rotation = full_rotation();
        rotation[4].fouled_out = true;
        let swaps = ensure_five_on_court(&mut rotation);
        assert!(!rotation[4].on_court);
        assert_eq!(swaps.len(), 1);
        assert_eq!(on_court_count(&rotation), 5);
    }
}
