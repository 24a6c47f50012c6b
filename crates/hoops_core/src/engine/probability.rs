//! Probability calculation utilities for possession resolution
//!
//! All functions are pure - they take ratings/modifiers as input and return
//! clamped probabilities. This allows unit testing without a full engine.

use rand::Rng;

use super::config::{ShootingConfig, ShotArchetype, TurnoverConfig};
use crate::models::Tier;

// ============================================================================
// Weighted selection
// ============================================================================

/// Pick an index with probability proportional to `weight`.
///
/// Zero, negative and non-finite weights are never picked. Returns `None`
/// when nothing has positive weight. Ties resolve in slice order.
pub fn weighted_pick<T, R, F>(rng: &mut R, items: &[T], weight: F) -> Option<usize>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f32,
{
    let sanitized = |item: &T| {
        let w = weight(item);
        if w.is_finite() && w > 0.0 {
            w
        } else {
            0.0
        }
    };

    let total: f32 = items.iter().map(&sanitized).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.gen::<f32>() * total;
    let mut last_positive = None;
    for (idx, item) in items.iter().enumerate() {
        let w = sanitized(item);
        if w <= 0.0 {
            continue;
        }
        if roll < w {
            return Some(idx);
        }
        roll -= w;
        last_positive = Some(idx);
    }
    // Float drift can leave a sliver of roll past the end
    last_positive
}

/// Bernoulli draw that tolerates out-of-range input.
#[inline]
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f32) -> bool {
    rng.gen::<f32>() < p.clamp(0.0, 1.0)
}

// ============================================================================
// Shot model
// ============================================================================

/// Modifiers shared by every probability computed in one possession.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShotContext {
    /// Shooter rating minus baseline, plus home-court and momentum bonuses
    pub rating_delta: f32,
    /// Probability-unit penalty from the defense (positive hurts the offense)
    pub defense: f32,
    /// Probability-unit bonus from offensive chemistry
    pub chemistry: f32,
}

/// Effective-rating delta for a shooter.
pub fn rating_delta(
    effective_rating: f32,
    is_home: bool,
    momentum_for_offense: f32,
    cfg: &ShootingConfig,
) -> f32 {
    let home = if is_home { cfg.home_court_bonus } else { 0.0 };
    effective_rating - cfg.baseline_rating + home + momentum_for_offense * cfg.momentum_rating_scale
}

/// Defense modifier in probability units: coach scheme plus on-court rating.
pub fn defense_modifier(coach_defense: f32, defender_avg_rating: f32, cfg: &ShootingConfig) -> f32 {
    coach_defense + (defender_avg_rating - cfg.baseline_rating) * cfg.defense_rating_scale
}

pub fn chemistry_bonus(chemistry: f32, cfg: &ShootingConfig) -> f32 {
    chemistry * cfg.chemistry_weight
}

pub fn three_point_rate(archetype: &ShotArchetype, coach_modifier: f32, cfg: &ShootingConfig) -> f32 {
    cfg.three_rate_bounds.clamp(archetype.three_point_rate + coach_modifier)
}

pub fn two_point_pct(archetype: &ShotArchetype, ctx: &ShotContext, cfg: &ShootingConfig) -> f32 {
    let p = archetype.two_point_pct + ctx.rating_delta * cfg.two_point_per_rating + ctx.chemistry
        - ctx.defense;
    cfg.two_point_bounds.clamp(p)
}

pub fn three_point_pct(archetype: &ShotArchetype, ctx: &ShotContext, cfg: &ShootingConfig) -> f32 {
    let p = archetype.three_point_pct + ctx.rating_delta * cfg.three_point_per_rating + ctx.chemistry
        - ctx.defense;
    cfg.three_point_bounds.clamp(p)
}

/// Free throws ignore the defense.
pub fn free_throw_pct(archetype: &ShotArchetype, rating_delta: f32, cfg: &ShootingConfig) -> f32 {
    cfg.free_throw_bounds.clamp(archetype.free_throw_pct + rating_delta * cfg.free_throw_per_rating)
}

pub fn turnover_rate(tier: Tier, defense: f32, cfg: &TurnoverConfig) -> f32 {
    cfg.bounds.clamp(cfg.base_rate.get(tier) + defense * cfg.defense_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SimConfig;
    use crate::models::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(3)
    }

    #[test]
    fn test_weighted_pick_never_selects_zero_weight() {
        let weights = [0.0f32, 1.0, 0.0, 3.0, -2.0, f32::NAN];
        let mut r = rng();
        let mut counts = [0u32; 6];
        for _ in 0..4000 {
            let idx = weighted_pick(&mut r, &weights, |w| *w).unwrap();
            counts[idx] += 1;
        }
        assert_eq!(counts[0] + counts[2] + counts[4] + counts[5], 0);
        // 1:3 split, loose bounds
        assert!(counts[3] > counts[1] * 2);
    }

    #[test]
    fn test_weighted_pick_empty_or_all_zero() {
        let mut r = rng();
        let empty: [f32; 0] = [];
        assert_eq!(weighted_pick(&mut r, &empty, |w| *w), None);
        assert_eq!(weighted_pick(&mut r, &[0.0f32, 0.0], |w| *w), None);
        assert_eq!(weighted_pick(&mut r, &[0.0f32, 2.0], |w| *w), Some(1));
    }

    #[test]
    fn test_rating_delta_components() {
        let cfg = SimConfig::default().shooting;
        assert_eq!(rating_delta(75.0, false, 0.0, &cfg), 0.0);
        assert!((rating_delta(80.0, true, 10.0, &cfg) - (5.0 + 3.0 + 2.0)).abs() < 1e-5);
        assert!(rating_delta(75.0, false, -10.0, &cfg) < 0.0);
    }

    #[test]
    fn test_shot_percentages_are_clamped() {
        let cfg = SimConfig::default().shooting;
        let arch = cfg.archetypes.get(Position::SG);
        let awful = ShotContext { rating_delta: -500.0, defense: 0.5, chemistry: 0.0 };
        let elite = ShotContext { rating_delta: 500.0, defense: -0.5, chemistry: 0.5 };
        assert_eq!(two_point_pct(arch, &awful, &cfg), 0.35);
        assert_eq!(two_point_pct(arch, &elite, &cfg), 0.62);
        assert_eq!(three_point_pct(arch, &awful, &cfg), 0.20);
        assert_eq!(three_point_pct(arch, &elite, &cfg), 0.45);
        assert_eq!(free_throw_pct(arch, 500.0, &cfg), 0.95);
    }

    #[test]
    fn test_rating_scales_per_point() {
        let cfg = SimConfig::default().shooting;
        let arch = cfg.archetypes.get(Position::SF);
        let base = ShotContext::default();
        let plus_ten = ShotContext { rating_delta: 10.0, ..base };
        let d2 = two_point_pct(arch, &plus_ten, &cfg) - two_point_pct(arch, &base, &cfg);
        let d3 = three_point_pct(arch, &plus_ten, &cfg) - three_point_pct(arch, &base, &cfg);
        assert!((d2 - 0.03).abs() < 1e-5);
        assert!((d3 - 0.015).abs() < 1e-5);
    }

    #[test]
    fn test_turnover_rate_by_tier_and_bounds() {
        let cfg = SimConfig::default().turnover;
        assert!((turnover_rate(Tier::One, 0.0, &cfg) - 0.135).abs() < 1e-6);
        assert!((turnover_rate(Tier::Three, 0.0, &cfg) - 0.145).abs() < 1e-6);
        assert_eq!(turnover_rate(Tier::One, 1.0, &cfg), 0.16);
        assert_eq!(turnover_rate(Tier::One, -1.0, &cfg), 0.11);
    }

    #[test]
    fn test_three_rate_includes_coach_modifier() {
        let cfg = SimConfig::default().shooting;
        let center = cfg.archetypes.get(Position::C);
        assert!((three_point_rate(center, 0.1, &cfg) - 0.18).abs() < 1e-6);
        assert_eq!(three_point_rate(center, -1.0, &cfg), 0.0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut r = rng();
        assert!((0..100).all(|_| !chance(&mut r, 0.0)));
        assert!((0..100).all(|_| chance(&mut r, 1.0)));
        assert!((0..100).all(|_| chance(&mut r, 7.0)));
    }
}
