//! # Simulation Configuration
//!
//! Every tunable constant of the possession model lives here so balance
//! changes never touch engine code.
//!
//! ## Usage
//! ```rust
//! use hoops_core::engine::config::SimConfig;
//!
//! let standard = SimConfig::default();
//! let fast = SimConfig::fast_paced();
//! let custom = SimConfig::from_yaml_str("foul:\n  foul_chance: 0.2\n").unwrap();
//! assert!(fast.pace.half_court.max < standard.pace.half_court.max);
//! assert!((custom.foul.foul_chance - 0.2).abs() < 1e-6);
//! ```

mod foul_config;
mod momentum_config;
mod pace_config;
mod rules_config;
mod shooting_config;
mod substitution_config;
mod turnover_config;

pub use foul_config::FoulConfig;
pub use momentum_config::MomentumConfig;
pub use pace_config::PaceConfig;
pub use rules_config::RulesConfig;
pub use shooting_config::{ArchetypeTable, ShootingConfig, ShotArchetype};
pub use substitution_config::SubstitutionConfig;
pub use turnover_config::TurnoverConfig;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::models::Tier;

/// Lookup table keyed by `Tier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTable<T> {
    pub one: T,
    pub two: T,
    pub three: T,
}

impl<T> TierTable<T> {
    pub const fn new(one: T, two: T, three: T) -> Self {
        Self { one, two, three }
    }

    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::One => &self.one,
            Tier::Two => &self.two,
            Tier::Three => &self.three,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.one, &self.two, &self.three].into_iter()
    }
}

/// Uniform range in seconds, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondsRange {
    pub min: f32,
    pub max: f32,
}

impl SecondsRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Closed probability interval used to clamp computed probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbBounds {
    pub min: f32,
    pub max: f32,
}

impl ProbBounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Non-finite input collapses to the lower bound.
    pub fn clamp(&self, p: f32) -> f32 {
        if p.is_finite() {
            p.clamp(self.min, self.max)
        } else {
            self.min
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub pace: PaceConfig,
    pub shooting: ShootingConfig,
    pub foul: FoulConfig,
    pub turnover: TurnoverConfig,
    pub substitution: SubstitutionConfig,
    pub momentum: MomentumConfig,
    pub rules: RulesConfig,
}

impl SimConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// Shorter possessions, more transition
    pub fn fast_paced() -> Self {
        let mut cfg = Self::default();
        cfg.pace.half_court = SecondsRange::new(7.0, 16.0);
        cfg.pace.fast_break = SecondsRange::new(3.0, 7.0);
        cfg.shooting.rebound_fast_break_chance = 0.25;
        cfg
    }

    /// Long half-court sets, fewer possessions
    pub fn grind() -> Self {
        let mut cfg = Self::default();
        cfg.pace.half_court = SecondsRange::new(12.0, 22.0);
        cfg.shooting.rebound_fast_break_chance = 0.08;
        cfg.turnover.steal_chance = 0.45;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: SimConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: SimConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let pace = &self.pace;
        for (name, range) in [
            ("pace.buzzer", pace.buzzer),
            ("pace.intentional_foul", pace.intentional_foul),
            ("pace.clock_milking", pace.clock_milking),
            ("pace.fast_break", pace.fast_break),
            ("pace.half_court", pace.half_court),
        ] {
            check_range(name, range)?;
        }
        if pace.tier_modifier.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(SimError::Config("pace.tier_modifier must be >= 0".into()));
        }

        let s = &self.shooting;
        for (name, bounds) in [
            ("shooting.two_point_bounds", s.two_point_bounds),
            ("shooting.three_point_bounds", s.three_point_bounds),
            ("shooting.free_throw_bounds", s.free_throw_bounds),
            ("shooting.three_rate_bounds", s.three_rate_bounds),
            ("turnover.bounds", self.turnover.bounds),
        ] {
            check_bounds(name, bounds)?;
        }

        for (name, p) in [
            ("shooting.assist_chance", s.assist_chance),
            ("shooting.and_one_chance", s.and_one_chance),
            ("shooting.block_chance", s.block_chance),
            ("shooting.offensive_rebound_chance", s.offensive_rebound_chance),
            ("shooting.rebound_fast_break_chance", s.rebound_fast_break_chance),
            ("foul.foul_chance", self.foul.foul_chance),
            ("foul.shooting_foul_share", self.foul.shooting_foul_share),
            ("foul.intentional_foul_chance", self.foul.intentional_foul_chance),
            ("turnover.steal_chance", self.turnover.steal_chance),
            ("substitution.partial_reset", self.substitution.partial_reset),
        ] {
            check_probability(name, p)?;
        }
        if self.turnover.base_rate.iter().any(|r| !(0.0..=1.0).contains(r)) {
            return Err(SimError::Config("turnover.base_rate must be within [0, 1]".into()));
        }

        if self.substitution.check_interval == 0 {
            return Err(SimError::Config("substitution.check_interval must be > 0".into()));
        }
        let m = &self.momentum;
        if !(0.0..=1.0).contains(&m.possession_decay)
            || !(0.0..=1.0).contains(&m.quarter_break_damping)
            || !(0.0..=1.0).contains(&m.timeout_damping)
        {
            return Err(SimError::Config("momentum decay factors must be within [0, 1]".into()));
        }
        if m.limit <= 0.0 || m.run_step == 0 {
            return Err(SimError::Config("momentum.limit and momentum.run_step must be > 0".into()));
        }
        Ok(())
    }
}

fn check_range(name: &str, range: SecondsRange) -> Result<()> {
    if !range.min.is_finite() || !range.max.is_finite() || range.min < 0.0 || range.min > range.max {
        return Err(SimError::Config(format!(
            "{name}: expected 0 <= min <= max, got [{}, {}]",
            range.min, range.max
        )));
    }
    Ok(())
}

fn check_bounds(name: &str, bounds: ProbBounds) -> Result<()> {
    if !(0.0..=1.0).contains(&bounds.min) || !(0.0..=1.0).contains(&bounds.max) || bounds.min > bounds.max {
        return Err(SimError::Config(format!(
            "{name}: expected 0 <= min <= max <= 1, got [{}, {}]",
            bounds.min, bounds.max
        )));
    }
    Ok(())
}

fn check_probability(name: &str, p: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(SimError::Config(format!("{name}: {p} is not a probability")));
    }
    Ok(())
}

// ========== Tests ==========
