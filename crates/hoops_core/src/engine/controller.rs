//! Quarter/Game Controller
//!
//! ```text
//! Q1 -> Q2 -> Q3 -> Q4 --(decided)--> Complete
//!                    |
//!                    +--(tied)--> OT1 --(tied)--> OT2 ... --(decided)--> Complete
//! ```
//!
//! Runs on the resolver call after the period clock hit zero.

use tracing::debug;

use super::clock::REGULATION_QUARTERS;
use super::game_sim::{jump_ball, GameEngine};
use super::substitutions::SubstitutionWindow;
use crate::models::{EventDetails, EventType, TeamSide};

impl GameEngine {
    pub(crate) fn handle_period_end(&mut self) {
        let clock = &self.state.clock;
        let in_regulation = !clock.is_overtime && clock.quarter < REGULATION_QUARTERS;

        let details = self.state.scored_details(EventDetails {
            is_overtime: Some(clock.is_overtime),
            ..Default::default()
        });
        self.state.push_event(EventType::QuarterEnd, None, Some(details));

        if in_regulation {
            self.start_next_quarter();
        } else if self.state.is_tied() {
            self.start_overtime();
        } else {
            self.complete_game();
        }
    }

    fn start_next_quarter(&mut self) {
        self.state.clock.start_next_quarter();
        self.state.offense = self.period_possession(self.state.clock.quarter);
        self.state.fast_break = false;
        self.state.momentum.damp(self.config.momentum.quarter_break_damping);
        for side in TeamSide::BOTH {
            self.run_substitutions(side, SubstitutionWindow::QuarterBreak);
        }
        debug!(
            quarter = self.state.clock.quarter,
            home = self.state.home_score,
            away = self.state.away_score,
            "quarter start"
        );
    }

    fn start_overtime(&mut self) {
        self.state.quarter_scores.home.push(0);
        self.state.quarter_scores.away.push(0);
        self.state.clock.start_overtime();
        self.state.offense = jump_ball(&mut self.rng);
        self.state.fast_break = false;

        let details = self.state.scored_details(EventDetails { is_overtime: Some(true), ..Default::default() });
        self.state.push_event(EventType::OvertimeStart, Some(self.state.offense), Some(details));
        for side in TeamSide::BOTH {
            self.run_substitutions(side, SubstitutionWindow::QuarterBreak);
        }
        debug!(period = %self.state.clock.period_label(), score = self.state.home_score, "overtime");
    }

    fn complete_game(&mut self) {
        self.state.is_complete = true;
        let is_overtime = self.state.clock.ot_period > 0;
        let details = self.state.scored_details(EventDetails { is_overtime: Some(is_overtime), ..Default::default() });
        self.state.push_event(EventType::GameEnd, None, Some(details));
        debug!(
            home = self.state.home_score,
            away = self.state.away_score,
            possessions = self.state.possessions,
            is_overtime,
            "game complete"
        );
    }

    /// Alternating possession: tip winner starts Q1 and Q4, the other side Q2 and Q3.
    fn period_possession(&self, quarter: u8) -> TeamSide {
        match quarter {
            2 | 3 => self.state.tip_winner.opponent(),
            _ => self.state.tip_winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::config::SimConfig;
    use crate::engine::fixtures;
    use crate::engine::game_sim::GameEngine;
    use crate::models::{EventType, TeamSide};

    fn engine(seed: u64) -> GameEngine {
        GameEngine::new(fixtures::balanced_setup(75.0), SimConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_quarter_end_runs_on_the_next_call() {
        let mut e = engine(3);
        e.force_situation(1, 3, 10, 8, TeamSide::Home);
        // Last possession drains the clock
        e.step();
        assert_eq!(e.state().clock.seconds_left, 0);
        assert_eq!(e.state().clock.quarter, 1);
        let possessions = e.state().possessions;

        let events = e.step().to_vec();
        assert_eq!(events[0].event_type, EventType::QuarterEnd);
        assert_eq!(events[0].quarter, 1);
        assert_eq!(e.state().clock.quarter, 2);
        assert_eq!(e.state().clock.seconds_left, 720);
        assert_eq!(e.state().possessions, possessions);
    }

    #[test]
    fn test_second_quarter_goes_to_tip_loser() {
        let mut e = engine(4);
        let tip = e.state().tip_winner;
        e.force_situation(1, 0, 0, 0, tip);
        e.step();
        assert_eq!(e.state().offense, tip.opponent());
        e.force_situation(3, 0, 0, 0, tip);
        e.step();
        assert_eq!(e.state().clock.quarter, 4);
        assert_eq!(e.state().offense, tip);
    }

    #[test]
    fn test_quarter_break_damps_momentum() {
        let mut e = engine(5);
        e.force_situation(2, 0, 0, 0, TeamSide::Home);
        e.state.momentum = crate::engine::momentum::Momentum::with_value(8.0);
        e.step();
        assert!((e.state().momentum.value() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_tie_after_fourth_goes_to_overtime() {
        let mut e = engine(6);
        e.force_situation(4, 0, 99, 99, TeamSide::Away);
        let events = e.step().to_vec();
        assert!(!e.is_complete());
        assert!(events.iter().any(|ev| ev.event_type == EventType::OvertimeStart));
        let clock = &e.state().clock;
        assert_eq!((clock.quarter, clock.seconds_left, clock.ot_period), (5, 300, 1));
        assert_eq!(e.state().quarter_scores.home.len(), 5);
        assert_eq!(e.state().quarter_scores.away.len(), 5);
    }

    #[test]
    fn test_decided_fourth_completes_game() {
        let mut e = engine(7);
        e.force_situation(4, 0, 101, 99, TeamSide::Away);
        let events = e.step().to_vec();
        assert!(e.is_complete());
        let end = events.last().unwrap();
        assert_eq!(end.event_type, EventType::GameEnd);
        assert_eq!(end.details.as_ref().and_then(|d| d.is_overtime), Some(false));
    }

    #[test]
    fn test_overtime_completion_flags_overtime() {
        let mut e = engine(8);
        e.force_situation(5, 0, 110, 108, TeamSide::Home);
        e.step();
        assert!(e.is_complete());
        let result = e.result();
        assert!(result.is_overtime);
        assert_eq!(result.overtime_periods, 1);
        let end = result.events.last().unwrap();
        assert_eq!(end.details.as_ref().and_then(|d| d.is_overtime), Some(true));
    }

    #[test]
    fn test_tied_overtime_extends_again() {
        let mut e = engine(9);
        e.force_situation(5, 0, 110, 110, TeamSide::Home);
        e.step();
        assert!(!e.is_complete());
        assert_eq!(e.state().clock.period_label(), "OT2");
        assert_eq!(e.state().quarter_scores.home.len(), 6);
    }
}
