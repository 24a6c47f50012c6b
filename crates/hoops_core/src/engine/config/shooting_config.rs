//! Shooting Configuration
//!
//! Archetype base percentages plus the rating/momentum/defense scaling that
//! turns them into per-shot probabilities. The clamp bounds are tuned for
//! game balance, validated only by aggregate outcomes (win rate, combined
//! points), not derived from a statistical model.

use serde::{Deserialize, Serialize};

use super::ProbBounds;
use crate::models::Position;

/// Shot profile for one position archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotArchetype {
    /// Share of attempts taken from beyond the arc
    pub three_point_rate: f32,
    pub three_point_pct: f32,
    pub two_point_pct: f32,
    pub free_throw_pct: f32,
    /// Weight when picking the assister
    pub assist_weight: f32,
    /// Weight when picking rebounders and shot blockers
    pub rebound_weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeTable {
    pub pg: ShotArchetype,
    pub sg: ShotArchetype,
    pub sf: ShotArchetype,
    pub pf: ShotArchetype,
    pub c: ShotArchetype,
}

impl ArchetypeTable {
    pub fn get(&self, position: Position) -> &ShotArchetype {
        match position {
            Position::PG => &self.pg,
            Position::SG => &self.sg,
            Position::SF => &self.sf,
            Position::PF => &self.pf,
            Position::C => &self.c,
        }
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self {
            pg: ShotArchetype {
                three_point_rate: 0.40,
                three_point_pct: 0.36,
                two_point_pct: 0.48,
                free_throw_pct: 0.82,
                assist_weight: 3.0,
                rebound_weight: 1.0,
            },
            sg: ShotArchetype {
                three_point_rate: 0.42,
                three_point_pct: 0.37,
                two_point_pct: 0.47,
                free_throw_pct: 0.81,
                assist_weight: 1.6,
                rebound_weight: 1.2,
            },
            sf: ShotArchetype {
                three_point_rate: 0.34,
                three_point_pct: 0.355,
                two_point_pct: 0.49,
                free_throw_pct: 0.78,
                assist_weight: 1.3,
                rebound_weight: 1.6,
            },
            pf: ShotArchetype {
                three_point_rate: 0.24,
                three_point_pct: 0.34,
                two_point_pct: 0.52,
                free_throw_pct: 0.74,
                assist_weight: 1.0,
                rebound_weight: 2.3,
            },
            c: ShotArchetype {
                three_point_rate: 0.08,
                three_point_pct: 0.31,
                two_point_pct: 0.56,
                free_throw_pct: 0.68,
                assist_weight: 0.8,
                rebound_weight: 3.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingConfig {
    // === Rating scaling ===
    /// League-average effective rating
    pub baseline_rating: f32,
    /// Probability shift per rating point above/below baseline
    pub two_point_per_rating: f32,
    pub three_point_per_rating: f32,
    pub free_throw_per_rating: f32,
    /// Rating points added for the home side
    pub home_court_bonus: f32,
    /// Rating points per unit of momentum in the shooter's favour
    pub momentum_rating_scale: f32,
    /// Probability penalty per rating point of the on-court defense above baseline
    pub defense_rating_scale: f32,
    /// Probability bonus per unit of chemistry
    pub chemistry_weight: f32,

    // === Clamp bounds ===
    pub two_point_bounds: ProbBounds,
    pub three_point_bounds: ProbBounds,
    pub free_throw_bounds: ProbBounds,
    pub three_rate_bounds: ProbBounds,

    // === Outcome chances ===
    pub assist_chance: f32,
    pub and_one_chance: f32,
    /// Chance a missed two is credited as a block
    pub block_chance: f32,
    pub offensive_rebound_chance: f32,
    /// Chance a defensive rebound starts a fast break
    pub rebound_fast_break_chance: f32,

    pub archetypes: ArchetypeTable,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            baseline_rating: 75.0,
            two_point_per_rating: 0.003,
            three_point_per_rating: 0.0015,
            free_throw_per_rating: 0.002,
            home_court_bonus: 3.0,
            momentum_rating_scale: 0.2,
            defense_rating_scale: 0.002,
            chemistry_weight: 0.02,

            two_point_bounds: ProbBounds::new(0.35, 0.62),
            three_point_bounds: ProbBounds::new(0.20, 0.45),
            free_throw_bounds: ProbBounds::new(0.40, 0.95),
            three_rate_bounds: ProbBounds::new(0.0, 0.75),

            assist_chance: 0.60,
            and_one_chance: 0.05,
            block_chance: 0.08,
            offensive_rebound_chance: 0.25,
            rebound_fast_break_chance: 0.15,

            archetypes: ArchetypeTable::default(),
        }
    }
}
