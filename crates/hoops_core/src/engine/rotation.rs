//! Collaborator seams
//!
//! The engine never decides who plays, how often they shoot, or how the
//! coach and chemistry layers score a team. Those come in through the traits
//! below and are folded into a `GameSetup` once, before tip-off.
//!
//! ## Provided implementations
//! - `DepthChartRotation`: best player per position starts, next five split
//!   the bench minutes
//! - `RatingUsage`: shot share proportional to rating above replacement,
//!   scaled by minutes
//! - `NeutralChemistry` / `NeutralCoach`: zero modifiers

use crate::error::{Result, SimError};
use crate::models::{CoachModifiers, GameSetup, Player, Position, RotationEntry, Team, TeamSetup, TeamSide};

/// Rating adjustment for accumulated fatigue. Used for display only.
pub type FatiguePenalty = fn(f32) -> f32;

/// Half a rating point per unit of fatigue.
pub fn default_fatigue_penalty(fatigue: f32) -> f32 {
    -0.5 * fatigue.max(0.0)
}

/// One line of a built rotation, before usage is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationSlot {
    pub player: Player,
    pub is_starter: bool,
    pub minutes: f32,
    pub effective_rating: f32,
}

impl From<RotationSlot> for RotationEntry {
    fn from(slot: RotationSlot) -> Self {
        RotationEntry::new(slot.player, slot.is_starter, slot.minutes, slot.effective_rating)
    }
}

pub trait RotationBuilder {
    /// Ordered rotation for `team`, honoring position eligibility.
    fn build_rotation(&self, team: &Team, fatigue_penalty: FatiguePenalty) -> Vec<RotationSlot>;
}

pub trait UsageCalculator {
    /// Assign `usage_share` to every entry in place.
    fn assign_usage(&self, rotation: &mut [RotationEntry]);
}

pub trait ChemistryModel {
    fn chemistry(&self, team: &Team, is_playoff: bool) -> f32;
}

pub trait CoachModel {
    fn modifiers(&self, team: &Team) -> CoachModifiers;
}

/// Bundle of collaborators used to assemble a game.
pub struct Collaborators<'a> {
    pub rotation: &'a dyn RotationBuilder,
    pub usage: &'a dyn UsageCalculator,
    pub chemistry: &'a dyn ChemistryModel,
    pub coach: &'a dyn CoachModel,
    pub fatigue_penalty: FatiguePenalty,
}

static DEPTH_CHART: DepthChartRotation = DepthChartRotation { starter_minutes: 32.0 };

impl Default for Collaborators<'static> {
    fn default() -> Self {
        Self {
            rotation: &DEPTH_CHART,
            usage: &RatingUsage,
            chemistry: &NeutralChemistry,
            coach: &NeutralCoach,
            fatigue_penalty: default_fatigue_penalty,
        }
    }
}

impl Collaborators<'_> {
    pub fn team_setup(&self, team: &Team, is_playoff: bool) -> TeamSetup {
        let mut rotation: Vec<RotationEntry> = self
            .rotation
            .build_rotation(team, self.fatigue_penalty)
            .into_iter()
            .map(RotationEntry::from)
            .collect();
        self.usage.assign_usage(&mut rotation);

        let mut setup = TeamSetup::new(team.clone(), rotation);
        setup.chemistry = self.chemistry.chemistry(team, is_playoff);
        setup.coach = self.coach.modifiers(team);
        setup
    }
}

impl GameSetup {
    /// Build and validate a matchup from collaborator output.
    pub fn from_collaborators(
        home: &Team,
        away: &Team,
        is_playoff: bool,
        collaborators: &Collaborators<'_>,
    ) -> Result<Self> {
        if home.id == away.id {
            return Err(SimError::rotation(TeamSide::Away, format!("team {} cannot play itself", home.id)));
        }
        let mut setup = GameSetup::new(
            collaborators.team_setup(home, is_playoff),
            collaborators.team_setup(away, is_playoff),
        );
        setup.is_playoff = is_playoff;
        setup.validate()?;
        Ok(setup)
    }
}

/// Minutes-weighted rating of a rotation with the fatigue penalty applied.
pub fn team_strength(rotation: &[RotationEntry], fatigue_penalty: FatiguePenalty) -> f32 {
    let minutes: f32 = rotation.iter().map(|e| e.minutes_budget.max(0.0)).sum();
    if minutes <= 0.0 {
        return 0.0;
    }
    rotation
        .iter()
        .map(|e| (e.effective_rating + fatigue_penalty(e.fatigue)) * e.minutes_budget.max(0.0))
        .sum::<f32>()
        / minutes
}

// ============================================================================
// Default collaborators
// ============================================================================

const TEAM_MINUTES: f32 = 240.0;
const BENCH_SIZE: usize = 5;

#[derive(Debug, Clone, Copy)]
pub struct DepthChartRotation {
    pub starter_minutes: f32,
}

impl RotationBuilder for DepthChartRotation {
    fn build_rotation(&self, team: &Team, fatigue_penalty: FatiguePenalty) -> Vec<RotationSlot> {
        let mut order: Vec<usize> = (0..team.players.len()).collect();
        // Stable: equal ratings keep roster order
        order.sort_by(|&a, &b| team.players[b].rating.total_cmp(&team.players[a].rating));

        let mut starters: Vec<usize> = Vec::with_capacity(5);
        for position in Position::ALL {
            if let Some(&idx) =
                order.iter().find(|&&i| team.players[i].position == position && !starters.contains(&i))
            {
                starters.push(idx);
            }
        }
        for &idx in &order {
            if starters.len() >= 5 {
                break;
            }
            if !starters.contains(&idx) {
                starters.push(idx);
            }
        }

        let bench: Vec<usize> =
            order.iter().copied().filter(|i| !starters.contains(i)).take(BENCH_SIZE).collect();
        let starter_minutes = self.starter_minutes.clamp(0.0, 48.0);
        let bench_minutes = if bench.is_empty() {
            0.0
        } else {
            ((TEAM_MINUTES - starter_minutes * starters.len() as f32) / bench.len() as f32).clamp(0.0, 48.0)
        };

        let fresh = fatigue_penalty(0.0);
        let slot = |idx: usize, is_starter: bool, minutes: f32| RotationSlot {
            player: team.players[idx].clone(),
            is_starter,
            minutes,
            effective_rating: team.players[idx].rating + fresh,
        };

        let mut rotation: Vec<RotationSlot> =
            starters.iter().map(|&i| slot(i, true, starter_minutes)).collect();
        rotation.extend(bench.iter().map(|&i| slot(i, false, bench_minutes)));
        rotation.extend(
            order
                .iter()
                .copied()
                .filter(|i| !starters.contains(i) && !bench.contains(i))
                .map(|i| slot(i, false, 0.0)),
        );
        rotation
    }
}

/// Replacement-level rating below which a player gets the minimum weight.
const REPLACEMENT_RATING: f32 = 50.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RatingUsage;

impl UsageCalculator for RatingUsage {
    fn assign_usage(&self, rotation: &mut [RotationEntry]) {
        let raw: Vec<f32> = rotation
            .iter()
            .map(|e| {
                if e.minutes_budget <= 0.0 {
                    0.0
                } else {
                    (e.effective_rating - REPLACEMENT_RATING).max(1.0) * (e.minutes_budget / 48.0)
                }
            })
            .collect();
        let total: f32 = raw.iter().sum();
        for (entry, weight) in rotation.iter_mut().zip(raw) {
            entry.usage_share = if total > 0.0 { weight / total } else { 0.0 };
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralChemistry;

impl ChemistryModel for NeutralChemistry {
    fn chemistry(&self, _team: &Team, _is_playoff: bool) -> f32 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralCoach;

impl CoachModel for NeutralCoach {
    fn modifiers(&self, _team: &Team) -> CoachModifiers {
        CoachModifiers::default()
    }
}
