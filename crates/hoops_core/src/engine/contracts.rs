//! Per-possession invariant checks
//!
//! - Debug and release builds: violations are logged with `tracing::warn!`
//! - `strict_contracts` feature (CI/test builds): violations panic

use super::game_sim::GameEngine;
use super::substitutions::{on_court_count, PLAYERS_ON_COURT};
use crate::models::TeamSide;

impl GameEngine {
    /// Every invariant that does not hold right now, as readable messages.
    #[doc(hidden)]
    pub fn contract_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let state = &self.state;

        let clock = &state.clock;
        if clock.consumed() + clock.seconds_left != clock.period_length() {
            violations.push(format!(
                "clock: consumed {} + left {} != period {}",
                clock.consumed(),
                clock.seconds_left,
                clock.period_length()
            ));
        }

        for side in TeamSide::BOTH {
            let periods = state.quarter_scores.total(side);
            if periods != state.score(side) {
                violations.push(format!("{side} score {} != sum of periods {periods}", state.score(side)));
            }

            let runtime = &self.sides[side.index()];
            if let Some(line) = runtime.stats.iter().find(|l| !l.is_consistent()) {
                violations.push(format!("{side} stat line for {} is inconsistent", line.player_id));
            }

            let eligible = runtime.setup.rotation.iter().filter(|e| e.is_eligible()).count();
            let on_court = on_court_count(&runtime.setup.rotation);
            if on_court != eligible.min(PLAYERS_ON_COURT) {
                violations.push(format!("{side} has {on_court} on court with {eligible} eligible"));
            }
            if runtime.setup.rotation.iter().any(|e| e.on_court && !e.is_eligible()) {
                violations.push(format!("{side} has an ineligible player on court"));
            }
        }

        if state.momentum.value().abs() > self.config.momentum.limit {
            violations.push(format!("momentum {} outside ±{}", state.momentum.value(), self.config.momentum.limit));
        }
        violations
    }

    pub(crate) fn check_contracts(&self) {
        for violation in self.contract_violations() {
            report_violation(&violation, self.state.possessions);
        }
    }
}

fn report_violation(violation: &str, possession: u32) {
    #[cfg(feature = "strict_contracts")]
    panic!("STRICT: contract violated at possession {possession}: {violation}");

    #[cfg(not(feature = "strict_contracts"))]
    tracing::warn!(possession, violation, "contract violated");
}
