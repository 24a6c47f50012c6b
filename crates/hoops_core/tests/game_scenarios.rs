//! End-to-end game scenarios driven through the public engine API.

use hoops_core::engine::{fixtures, GameEngine, LiveGame, SimConfig};
use hoops_core::models::{EventType, GameSetup, TeamSetup, Tier};
use hoops_core::{simulate_game, TeamSide};

fn engine_with(config: SimConfig, seed: u64) -> GameEngine {
    GameEngine::new(fixtures::balanced_setup(75.0), config, seed).unwrap()
}

fn always_foul_when_leading() -> SimConfig {
    let mut cfg = SimConfig::default();
    cfg.foul.intentional_foul_chance = 1.0;
    cfg
}

#[test]
fn trailing_defense_fouls_late_in_the_fourth() {
    for seed in 0..20 {
        let mut engine = engine_with(always_foul_when_leading(), seed);
        // Home leads by 5 with 1:30 left and has the ball
        engine.force_situation(4, 90, 100, 95, TeamSide::Home);
        let events = engine.step().to_vec();

        let fouls: Vec<_> = events.iter().filter(|e| e.event_type == EventType::IntentionalFoul).collect();
        assert_eq!(fouls.len(), 1, "seed {seed}");
        assert_eq!(fouls[0].side, Some(TeamSide::Away));
        assert!(events.iter().any(|e| e.event_type == EventType::FreeThrows && e.side == Some(TeamSide::Home)));
        assert!(!events
            .iter()
            .any(|e| matches!(e.event_type, EventType::MadeShot | EventType::MissedShot)));
        assert_eq!(engine.state().offense, TeamSide::Away);
    }
}

#[test]
fn leading_defense_never_fouls_intentionally() {
    for seed in 0..20 {
        let mut engine = engine_with(always_foul_when_leading(), seed);
        // Home has the ball but trails by 5
        engine.force_situation(4, 90, 95, 100, TeamSide::Home);
        let events = engine.step().to_vec();
        assert!(!events.iter().any(|e| e.event_type == EventType::IntentionalFoul), "seed {seed}");
    }
}

#[test]
fn no_intentional_fouls_outside_fouling_time() {
    let result = engine_with(always_foul_when_leading(), 11).resolve();
    for event in result.events.iter().filter(|e| e.event_type == EventType::IntentionalFoul) {
        assert!(event.quarter >= 4, "intentional foul in quarter {}", event.quarter);
    }
}

#[test]
fn final_possession_then_period_transition() {
    let mut engine = engine_with(SimConfig::default(), 3);
    engine.force_situation(2, 4, 50, 48, TeamSide::Away);

    engine.step();
    assert_eq!(engine.state().clock.seconds_left, 0);
    assert_eq!(engine.state().clock.quarter, 2);

    let events = engine.step().to_vec();
    assert_eq!(events.first().map(|e| e.event_type), Some(EventType::QuarterEnd));
    assert_eq!(engine.state().clock.quarter, 3);
    assert_eq!(engine.state().clock.seconds_left, 720);
}

#[test]
fn tied_regulation_plays_overtime() {
    let mut engine = engine_with(SimConfig::default(), 17);
    engine.force_situation(4, 0, 101, 101, TeamSide::Home);
    engine.run_to_completion();
    let result = engine.result();

    assert!(result.is_overtime);
    assert!(result.overtime_periods >= 1);
    assert_ne!(result.home_score, result.away_score);
    assert_eq!(result.quarter_scores.periods(), 4 + result.overtime_periods as usize);
    assert!(result.events.iter().any(|e| e.event_type == EventType::OvertimeStart));
}

#[test]
fn single_eligible_player_still_finishes() {
    let mut setup = fixtures::balanced_setup(75.0);
    let lone = setup.home.rotation[0].clone().with_usage(1.0);
    setup.home = TeamSetup::new(setup.home.team.clone(), vec![lone]);

    let mut engine = GameEngine::new(setup, SimConfig::default(), 5).unwrap();
    while !engine.is_complete() {
        engine.step();
        assert_eq!(engine.contract_violations(), Vec::<String>::new());
    }
    let result = engine.result();
    assert_eq!(result.home_players.len(), 1);
    let game_minutes = 48.0 + 5.0 * result.overtime_periods as f32;
    assert_eq!(result.home_players[0].minutes, game_minutes);
    assert_eq!(result.home_players[0].points, result.home_score);
}

#[test]
fn result_is_idempotent_and_matches_batch() {
    let mut live = LiveGame::new(fixtures::balanced_setup(78.0), SimConfig::default(), 99).unwrap();
    for _ in 0..80 {
        live.step().unwrap();
    }
    assert_eq!(live.result(), live.result());

    let finished = live.finish();
    let batch = simulate_game(fixtures::balanced_setup(78.0), SimConfig::default(), 99).unwrap();
    assert_eq!(finished, batch);
}

#[test]
fn box_score_is_internally_consistent() {
    let result = engine_with(SimConfig::default(), 31).resolve();
    for side in TeamSide::BOTH {
        let totals = result.team_totals(side);
        assert_eq!(totals.points, result.score(side));
        for line in result.players(side) {
            assert!(line.is_consistent(), "{}", line.player_id);
            assert!(line.fgm <= line.fga && line.tpm <= line.tpa && line.ftm <= line.fta);
            assert!(line.fouls <= 6);
        }
    }
}

#[test]
fn balanced_games_land_in_a_realistic_range() {
    let games = 400;
    let mut home_wins = 0;
    let mut combined = 0u32;
    for seed in 0..games {
        let result = simulate_game(fixtures::balanced_setup(75.0), SimConfig::default(), seed).unwrap();
        if result.winner() == Some(TeamSide::Home) {
            home_wins += 1;
        }
        combined += result.combined_points() as u32;
    }

    let avg = combined as f32 / games as f32;
    let home_rate = home_wins as f32 / games as f32;
    assert!((195.0..=235.0).contains(&avg), "average combined points {avg}");
    // Coin flip plus home court
    assert!((0.48..=0.65).contains(&home_rate), "home win rate {home_rate}");
}

#[test]
fn stronger_roster_wins_most_games() {
    let games = 100;
    let wins = (0..games)
        .filter(|&seed| {
            let setup = GameSetup::new(
                fixtures::balanced_team_setup("strong", "Strong", Tier::One, 85.0),
                fixtures::balanced_team_setup("weak", "Weak", Tier::One, 65.0),
            );
            simulate_game(setup, SimConfig::default(), seed).unwrap().winner() == Some(TeamSide::Home)
        })
        .count();
    assert!(wins >= 70, "strong side won {wins} of {games}");
}
