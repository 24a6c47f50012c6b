//! Pace Model
//!
//! Decides how many seconds a possession takes. Rules are checked in
//! priority order and the first match wins.

use rand::Rng;

use super::config::PaceConfig;
use crate::models::Tier;

/// Game context the pace model looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceContext {
    pub quarter: u8,
    pub seconds_left: u32,
    /// Offense score minus defense score
    pub offense_margin: i32,
    pub is_fouling_time: bool,
    /// Previous possession ended in a live-ball turnover or long rebound
    pub fast_break: bool,
    pub tier: Tier,
}

/// Which rule produced the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceRule {
    ForceEnd,
    Buzzer,
    IntentionalFoul,
    HurryUp,
    ClockMilking,
    FastBreak,
    HalfCourt,
}

pub fn possession_duration<R: Rng + ?Sized>(
    ctx: &PaceContext,
    cfg: &PaceConfig,
    rng: &mut R,
) -> (u32, PaceRule) {
    if ctx.seconds_left <= cfg.force_end_threshold {
        return (ctx.seconds_left, PaceRule::ForceEnd);
    }

    let tier_mod = *cfg.tier_modifier.get(ctx.tier);

    let (raw, rule) = if ctx.seconds_left <= cfg.buzzer_threshold {
        (cfg.buzzer.sample(rng), PaceRule::Buzzer)
    } else if ctx.is_fouling_time && ctx.offense_margin > 0 {
        (cfg.intentional_foul.sample(rng), PaceRule::IntentionalFoul)
    } else if ctx.is_fouling_time && ctx.offense_margin < 0 {
        (cfg.fast_break.sample(rng), PaceRule::HurryUp)
    } else if ctx.quarter >= cfg.milking_min_quarter
        && ctx.offense_margin >= cfg.milking_min_margin
        && ctx.seconds_left < cfg.milking_max_seconds_left
    {
        (cfg.clock_milking.sample(rng) + tier_mod, PaceRule::ClockMilking)
    } else if ctx.fast_break {
        (cfg.fast_break.sample(rng) + tier_mod * 0.5, PaceRule::FastBreak)
    } else {
        (cfg.half_court.sample(rng) + tier_mod, PaceRule::HalfCourt)
    };

    (to_whole_seconds(raw).min(ctx.seconds_left), rule)
}

fn to_whole_seconds(raw: f32) -> u32 {
    if raw.is_finite() {
        raw.round().max(1.0) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx() -> PaceContext {
        PaceContext {
            quarter: 1,
            seconds_left: 600,
            offense_margin: 0,
            is_fouling_time: false,
            fast_break: false,
            tier: Tier::One,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn test_last_seconds_take_the_rest_of_the_period() {
        let cfg = PaceConfig::default();
        for left in 0..=5 {
            let c = PaceContext { seconds_left: left, ..ctx() };
            assert_eq!(possession_duration(&c, &cfg, &mut rng()), (left, PaceRule::ForceEnd));
        }
    }

    #[test]
    fn test_buzzer_range_capped_at_seconds_left() {
        let cfg = PaceConfig::default();
        let mut r = rng();
        for _ in 0..200 {
            let c = PaceContext { seconds_left: 6, ..ctx() };
            let (secs, rule) = possession_duration(&c, &cfg, &mut r);
            assert_eq!(rule, PaceRule::Buzzer);
            assert!((1..=6).contains(&secs));
        }
    }

    #[test]
    fn test_fouling_time_rules() {
        let cfg = PaceConfig::default();
        let leading = PaceContext { quarter: 4, seconds_left: 90, offense_margin: 5, is_fouling_time: true, ..ctx() };
        let trailing = PaceContext { offense_margin: -5, ..leading };
        let mut r = rng();
        for _ in 0..100 {
            let (secs, rule) = possession_duration(&leading, &cfg, &mut r);
            assert_eq!(rule, PaceRule::IntentionalFoul);
            assert!((2..=5).contains(&secs));
            assert_eq!(possession_duration(&trailing, &cfg, &mut r).1, PaceRule::HurryUp);
        }
    }

    #[test]
    fn test_clock_milking_requires_leading_offense() {
        let cfg = PaceConfig::default();
        let c = PaceContext { quarter: 4, seconds_left: 300, offense_margin: 18, ..ctx() };
        let (secs, rule) = possession_duration(&c, &cfg, &mut rng());
        assert_eq!(rule, PaceRule::ClockMilking);
        assert!((18..=24).contains(&secs));

        let defense_leads = PaceContext { offense_margin: -18, ..c };
        assert_eq!(possession_duration(&defense_leads, &cfg, &mut rng()).1, PaceRule::HalfCourt);

        let too_early = PaceContext { seconds_left: 360, ..c };
        assert_eq!(possession_duration(&too_early, &cfg, &mut rng()).1, PaceRule::HalfCourt);
    }

    #[test]
    fn test_fast_break_is_short() {
        let cfg = PaceConfig::default();
        let c = PaceContext { fast_break: true, ..ctx() };
        let mut r = rng();
        for _ in 0..200 {
            let (secs, rule) = possession_duration(&c, &cfg, &mut r);
            assert_eq!(rule, PaceRule::FastBreak);
            assert!((4..=9).contains(&secs));
        }
    }

    #[test]
    fn test_lower_tier_plays_slower() {
        let cfg = PaceConfig::default();
        let mut r1 = rng();
        let mut r3 = rng();
        let t1: u32 = (0..500).map(|_| possession_duration(&ctx(), &cfg, &mut r1).0).sum();
        let t3: u32 = (0..500)
            .map(|_| possession_duration(&PaceContext { tier: Tier::Three, ..ctx() }, &cfg, &mut r3).0)
            .sum();
        // Same draws, roughly +2s each
        assert!(t3 >= t1 + 990 && t3 <= t1 + 1010, "t1={t1} t3={t3}");
    }
}
