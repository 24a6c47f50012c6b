//! Possession Resolver
//!
//! One call resolves one possession, checked in this order, each step able
//! to end it early:
//!
//! 1. pace model runs the clock
//! 2. shooter picked by usage share
//! 3. rating, defense and chemistry modifiers
//! 4. intentional foul (fouling time, offense leading)
//! 5. turnover
//! 6. foul (shooting fouls end the possession, common fouls don't)
//! 7. shot, then rebound on a miss
//!
//! If the period clock already reads zero the call handles the period
//! transition instead and no possession is played.

use super::config::ShotArchetype;
use super::game_sim::GameEngine;
use super::pace::{possession_duration, PaceContext};
use super::probability::{self, chance, weighted_pick, ShotContext};
use super::substitutions::{advance_fatigue, SubstitutionWindow};
use crate::models::{EventDetails, EventType, RotationEntry, ShotType, TeamSide};

/// Whether the ball changes hands after the possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PossessionEnd {
    ChangeOfPossession,
    OffensiveRebound,
}

/// Weighting used when picking a player off the floor.
#[derive(Debug, Clone, Copy)]
enum PickWeight {
    Uniform,
    Assist,
    Rebound,
}

impl GameEngine {
    pub(crate) fn resolve_possession(&mut self) {
        if self.state.is_complete {
            return;
        }
        if self.state.clock.is_quarter_over() {
            self.handle_period_end();
            return;
        }

        let offense = self.state.offense;
        let fouling_time = self.state.is_fouling_time(&self.config.rules);
        let pace_ctx = PaceContext {
            quarter: self.state.clock.quarter,
            seconds_left: self.state.clock.seconds_left,
            offense_margin: self.state.margin_for(offense),
            is_fouling_time: fouling_time,
            fast_break: self.state.fast_break,
            tier: self.sides[offense.index()].setup.team.tier,
        };
        let (seconds, rule) = possession_duration(&pace_ctx, &self.config.pace, &mut self.rng);
        self.state.fast_break = false;
        self.state.possessions += 1;
        self.state.clock.consume(seconds);
        tracing::trace!(possession = self.state.possessions, ?offense, seconds, ?rule, "possession");

        let end = match self.pick_shooter(offense) {
            Some(shooter) => self.play_possession(offense, shooter, fouling_time),
            None => {
                tracing::warn!(
                    ?offense,
                    possession = self.state.possessions,
                    "no shooter available on court, possession skipped"
                );
                PossessionEnd::ChangeOfPossession
            }
        };
        self.end_possession(end);
    }

    fn play_possession(&mut self, offense: TeamSide, shooter: usize, fouling_time: bool) -> PossessionEnd {
        let ctx = self.shot_context(offense, shooter);

        if fouling_time
            && self.state.margin_for(offense) > 0
            && chance(&mut self.rng, self.config.foul.intentional_foul_chance)
        {
            self.intentional_foul(offense, shooter, &ctx);
            return PossessionEnd::ChangeOfPossession;
        }

        let tier = self.sides[offense.index()].setup.team.tier;
        let turnover_rate = probability::turnover_rate(tier, ctx.defense, &self.config.turnover);
        if chance(&mut self.rng, turnover_rate) {
            self.turnover(offense, shooter);
            return PossessionEnd::ChangeOfPossession;
        }

        if chance(&mut self.rng, self.config.foul.foul_chance) {
            if chance(&mut self.rng, self.config.foul.shooting_foul_share) {
                self.shooting_foul(offense, shooter, &ctx);
                return PossessionEnd::ChangeOfPossession;
            }
            self.common_foul(offense.opponent(), shooter);
        }

        self.shot_attempt(offense, shooter, &ctx)
    }

    fn end_possession(&mut self, end: PossessionEnd) {
        if end == PossessionEnd::ChangeOfPossession {
            self.state.offense = self.state.offense.opponent();
        }
        self.state.momentum.damp(self.config.momentum.possession_decay);

        for runtime in self.sides.iter_mut() {
            advance_fatigue(&mut runtime.setup.rotation, &self.config.substitution);
        }
        if self.state.possessions % self.config.substitution.check_interval == 0 {
            for side in TeamSide::BOTH {
                self.run_substitutions(side, SubstitutionWindow::MidQuarter);
            }
        }

        self.check_contracts();
        if self.state.clock.is_quarter_over() {
            tracing::trace!(period = %self.state.clock.period_label(), "period clock expired");
        }
    }

    // ========================================================================
    // Selection and modifiers
    // ========================================================================

    fn pick_shooter(&mut self, offense: TeamSide) -> Option<usize> {
        weighted_pick(&mut self.rng, &self.sides[offense.index()].setup.rotation, |e| {
            if e.on_court && e.is_eligible() {
                e.usage_share
            } else {
                0.0
            }
        })
    }

    /// Random on-court player of `side`, optionally excluding one slot.
    fn pick_on_court(&mut self, side: TeamSide, exclude: Option<usize>, weight: PickWeight) -> Option<usize> {
        let archetypes = &self.config.shooting.archetypes;
        let rotation = &self.sides[side.index()].setup.rotation;
        let weights: Vec<f32> = rotation
            .iter()
            .enumerate()
            .map(|(idx, e)| {
                if !e.on_court || Some(idx) == exclude {
                    return 0.0;
                }
                match weight {
                    PickWeight::Uniform => 1.0,
                    PickWeight::Assist => archetypes.get(e.player.position).assist_weight,
                    PickWeight::Rebound => archetypes.get(e.player.position).rebound_weight,
                }
            })
            .collect();
        weighted_pick(&mut self.rng, &weights, |w| *w)
    }

    fn shot_context(&self, offense: TeamSide, shooter: usize) -> ShotContext {
        let cfg = &self.config.shooting;
        let attack = &self.sides[offense.index()];
        let defense = &self.sides[offense.opponent().index()];

        let (sum, count) = defense.on_court().fold((0.0f32, 0u32), |(s, n), e| (s + e.effective_rating, n + 1));
        let defender_avg = if count == 0 { cfg.baseline_rating } else { sum / count as f32 };

        ShotContext {
            rating_delta: probability::rating_delta(
                attack.setup.rotation[shooter].effective_rating,
                offense.is_home(),
                self.state.momentum.for_side(offense),
                cfg,
            ),
            defense: probability::defense_modifier(defense.setup.coach.defense_modifier, defender_avg, cfg),
            chemistry: probability::chemistry_bonus(attack.setup.chemistry, cfg),
        }
    }

    fn archetype(&self, side: TeamSide, idx: usize) -> ShotArchetype {
        let position = self.entry(side, idx).player.position;
        *self.config.shooting.archetypes.get(position)
    }

    fn choose_shot_type(&mut self, offense: TeamSide, shooter: usize) -> ShotType {
        let archetype = self.archetype(offense, shooter);
        let coach_modifier = self.sides[offense.index()].setup.coach.three_pt_rate_modifier;
        let rate = probability::three_point_rate(&archetype, coach_modifier, &self.config.shooting);
        if chance(&mut self.rng, rate) {
            ShotType::ThreePoint
        } else {
            ShotType::TwoPoint
        }
    }

    fn entry(&self, side: TeamSide, idx: usize) -> &RotationEntry {
        &self.sides[side.index()].setup.rotation[idx]
    }

    fn name(&self, side: TeamSide, idx: usize) -> String {
        self.entry(side, idx).player.name.clone()
    }

    // ========================================================================
    // Outcomes
    // ========================================================================

    fn intentional_foul(&mut self, offense: TeamSide, shooter: usize, ctx: &ShotContext) {
        let defense = offense.opponent();
        let fouler = self.pick_on_court(defense, None, PickWeight::Uniform);
        let details = EventDetails {
            player: fouler.map(|f| self.name(defense, f)),
            fouled_player: Some(self.name(offense, shooter)),
            attempts: Some(2),
            ..Default::default()
        };
        self.state.push_event(EventType::IntentionalFoul, Some(defense), Some(details));
        if let Some(f) = fouler {
            self.charge_foul(defense, f);
        }

        let pct = probability::free_throw_pct(&self.archetype(offense, shooter), ctx.rating_delta, &self.config.shooting);
        self.free_throws(offense, shooter, 2, pct);
    }

    fn turnover(&mut self, offense: TeamSide, handler: usize) {
        let defense = offense.opponent();
        self.sides[offense.index()].stats[handler].turnovers += 1;

        let stealer = if chance(&mut self.rng, self.config.turnover.steal_chance) {
            self.pick_on_court(defense, None, PickWeight::Uniform)
        } else {
            None
        };
        if let Some(s) = stealer {
            self.sides[defense.index()].stats[s].steals += 1;
        }

        let details = EventDetails {
            player: Some(self.name(offense, handler)),
            steal_by: stealer.map(|s| self.name(defense, s)),
            ..Default::default()
        };
        self.state.push_event(EventType::Turnover, Some(offense), Some(details));
        self.state.fast_break = true;
    }

    /// Non-shooting foul. Logged, play goes on.
    fn common_foul(&mut self, defense: TeamSide, fouled: usize) {
        let offense = defense.opponent();
        let Some(fouler) = self.pick_on_court(defense, None, PickWeight::Uniform) else {
            return;
        };
        let details = EventDetails {
            player: Some(self.name(defense, fouler)),
            fouled_player: Some(self.name(offense, fouled)),
            ..Default::default()
        };
        self.state.push_event(EventType::Foul, Some(defense), Some(details));
        self.charge_foul(defense, fouler);
    }

    fn shooting_foul(&mut self, offense: TeamSide, shooter: usize, ctx: &ShotContext) {
        let defense = offense.opponent();
        let shot_type = self.choose_shot_type(offense, shooter);
        let attempts = shot_type.foul_shots();
        let fouler = self.pick_on_court(defense, None, PickWeight::Uniform);

        let details = EventDetails {
            player: fouler.map(|f| self.name(defense, f)),
            fouled_player: Some(self.name(offense, shooter)),
            shot_type: Some(shot_type),
            attempts: Some(attempts),
            ..Default::default()
        };
        self.state.push_event(EventType::ShootingFoul, Some(defense), Some(details));
        if let Some(f) = fouler {
            self.charge_foul(defense, f);
        }

        let pct = probability::free_throw_pct(&self.archetype(offense, shooter), ctx.rating_delta, &self.config.shooting);
        self.free_throws(offense, shooter, attempts, pct);
    }

    fn shot_attempt(&mut self, offense: TeamSide, shooter: usize, ctx: &ShotContext) -> PossessionEnd {
        let shot_type = self.choose_shot_type(offense, shooter);
        let archetype = self.archetype(offense, shooter);
        let is_three = shot_type == ShotType::ThreePoint;
        let pct = if is_three {
            probability::three_point_pct(&archetype, ctx, &self.config.shooting)
        } else {
            probability::two_point_pct(&archetype, ctx, &self.config.shooting)
        };

        let made = chance(&mut self.rng, pct);
        self.sides[offense.index()].stats[shooter].record_field_goal(made, is_three);

        if made {
            self.made_shot(offense, shooter, shot_type, ctx);
            PossessionEnd::ChangeOfPossession
        } else {
            self.missed_shot(offense, shooter, shot_type)
        }
    }

    fn made_shot(&mut self, offense: TeamSide, shooter: usize, shot_type: ShotType, ctx: &ShotContext) {
        let defense = offense.opponent();
        let points = shot_type.points();

        let assister = if chance(&mut self.rng, self.config.shooting.assist_chance) {
            self.pick_on_court(offense, Some(shooter), PickWeight::Assist)
        } else {
            None
        };
        if let Some(a) = assister {
            self.sides[offense.index()].stats[a].assists += 1;
        }

        let run = self.award_points(offense, points);
        let details = self.state.scored_details(EventDetails {
            player: Some(self.name(offense, shooter)),
            points: Some(points),
            shot_type: Some(shot_type),
            assist_by: assister.map(|a| self.name(offense, a)),
            ..Default::default()
        });
        self.state.push_event(EventType::MadeShot, Some(offense), Some(details));
        self.announce_run(offense, run);

        if shot_type == ShotType::TwoPoint && chance(&mut self.rng, self.config.shooting.and_one_chance) {
            let fouler = self.pick_on_court(defense, None, PickWeight::Uniform);
            let details = EventDetails {
                player: fouler.map(|f| self.name(defense, f)),
                fouled_player: Some(self.name(offense, shooter)),
                shot_type: Some(shot_type),
                attempts: Some(1),
                ..Default::default()
            };
            self.state.push_event(EventType::ShootingFoul, Some(defense), Some(details));
            if let Some(f) = fouler {
                self.charge_foul(defense, f);
            }
            let pct =
                probability::free_throw_pct(&self.archetype(offense, shooter), ctx.rating_delta, &self.config.shooting);
            self.free_throws(offense, shooter, 1, pct);
        }
    }

    fn missed_shot(&mut self, offense: TeamSide, shooter: usize, shot_type: ShotType) -> PossessionEnd {
        let defense = offense.opponent();

        let blocker = if shot_type == ShotType::TwoPoint && chance(&mut self.rng, self.config.shooting.block_chance) {
            self.pick_on_court(defense, None, PickWeight::Rebound)
        } else {
            None
        };
        if let Some(b) = blocker {
            self.sides[defense.index()].stats[b].blocks += 1;
        }
        let details = EventDetails {
            player: Some(self.name(offense, shooter)),
            shot_type: Some(shot_type),
            blocked_by: blocker.map(|b| self.name(defense, b)),
            ..Default::default()
        };
        self.state.push_event(EventType::MissedShot, Some(offense), Some(details));

        if chance(&mut self.rng, self.config.shooting.offensive_rebound_chance) {
            if let Some(r) = self.pick_on_court(offense, None, PickWeight::Rebound) {
                self.record_rebound(offense, r, true);
                return PossessionEnd::OffensiveRebound;
            }
        }

        if let Some(r) = self.pick_on_court(defense, None, PickWeight::Rebound) {
            self.record_rebound(defense, r, false);
        }
        if chance(&mut self.rng, self.config.shooting.rebound_fast_break_chance) {
            self.state.fast_break = true;
        }
        PossessionEnd::ChangeOfPossession
    }

    fn record_rebound(&mut self, side: TeamSide, idx: usize, offensive: bool) {
        self.sides[side.index()].stats[idx].record_rebound(offensive);
        let details = EventDetails {
            player: Some(self.name(side, idx)),
            offensive: Some(offensive),
            ..Default::default()
        };
        self.state.push_event(EventType::Rebound, Some(side), Some(details));
    }

    // ========================================================================
    // Shared bookkeeping
    // ========================================================================

    /// Shoot `attempts` free throws. Returns how many went in.
    fn free_throws(&mut self, side: TeamSide, shooter: usize, attempts: u8, pct: f32) -> u8 {
        let mut made = 0u8;
        for _ in 0..attempts {
            let hit = chance(&mut self.rng, pct);
            self.sides[side.index()].stats[shooter].record_free_throw(hit);
            made += u8::from(hit);
        }

        let run = if made > 0 { self.award_points(side, made) } else { None };
        let details = self.state.scored_details(EventDetails {
            player: Some(self.name(side, shooter)),
            attempts: Some(attempts),
            made: Some(made),
            ..Default::default()
        });
        self.state.push_event(EventType::FreeThrows, Some(side), Some(details));
        self.announce_run(side, run);
        made
    }

    /// Score, momentum and run bookkeeping. Returns a run total worth announcing.
    fn award_points(&mut self, side: TeamSide, points: u8) -> Option<u16> {
        self.state.add_points(side, u16::from(points));
        self.state.momentum.apply_score(side, points, &self.config.momentum);
        self.state.runs.record(side, points, &self.config.momentum)
    }

    fn announce_run(&mut self, side: TeamSide, run: Option<u16>) {
        if let Some(run_points) = run {
            let details = EventDetails { run_points: Some(run_points), ..Default::default() };
            self.state.push_event(EventType::Run, Some(side), Some(details));
        }
    }

    /// Personal foul bookkeeping, including the foul-out.
    fn charge_foul(&mut self, side: TeamSide, idx: usize) {
        let limit = self.config.foul.foul_out_limit;
        let runtime = &mut self.sides[side.index()];
        runtime.stats[idx].fouls += 1;
        let entry = &mut runtime.setup.rotation[idx];
        entry.fouls = entry.fouls.saturating_add(1);
        if entry.fouls < limit || entry.fouled_out {
            return;
        }

        entry.fouled_out = true;
        entry.on_court = false;
        let name = entry.player.name.clone();
        tracing::debug!(?side, player = %name, "fouled out");
        self.state.push_event(EventType::FoulOut, Some(side), Some(EventDetails::player(name)));
        self.refill_lineup(side);
    }
}
