//! Batch runner helpers behind the `hoops` binary.
//!
//! Loads teams and config from disk, runs many independently seeded games
//! in parallel and boils the results down to a summary.

use std::path::Path;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use hoops_core::engine::{derive_game_seed, fixtures, Collaborators};
use hoops_core::models::{GameEvent, PlayerStatLine, Team, Tier};
use hoops_core::{simulate_game, GameResult, GameSetup, SimConfig, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    Standard,
    FastPaced,
    Grind,
}

impl Preset {
    pub fn config(self) -> SimConfig {
        match self {
            Preset::Standard => SimConfig::standard(),
            Preset::FastPaced => SimConfig::fast_paced(),
            Preset::Grind => SimConfig::grind(),
        }
    }
}

/// Read a `Team` (id, name, tier, players) from a JSON file.
pub fn load_team(path: &Path) -> Result<Team> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading team file {}", path.display()))?;
    let team: Team =
        serde_json::from_str(&raw).with_context(|| format!("parsing team file {}", path.display()))?;
    if team.players.is_empty() {
        bail!("team {} in {} has no players", team.id, path.display());
    }
    Ok(team)
}

/// YAML for `.yaml`/`.yml`, JSON otherwise.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yaml" | "yml"));
    let config = if is_yaml { SimConfig::from_yaml_str(&raw) } else { SimConfig::from_json_str(&raw) };
    config.with_context(|| format!("loading config {}", path.display()))
}

/// Matchup from team files, or the balanced demo teams when none are given.
pub fn build_setup(home: Option<&Path>, away: Option<&Path>, is_playoff: bool) -> Result<GameSetup> {
    let home = match home {
        Some(path) => load_team(path)?,
        None => fixtures::balanced_team("home", "Home", Tier::One, 75.0),
    };
    let away = match away {
        Some(path) => load_team(path)?,
        None => fixtures::balanced_team("away", "Away", Tier::One, 75.0),
    };
    GameSetup::from_collaborators(&home, &away, is_playoff, &Collaborators::default())
        .context("building game setup")
}

/// Play `games` games in parallel. Game `i` uses `derive_game_seed(base_seed, i)`,
/// so results do not depend on thread count.
pub fn run_batch(setup: &GameSetup, config: &SimConfig, base_seed: u64, games: u32) -> Result<Vec<GameResult>> {
    (0..games)
        .into_par_iter()
        .map(|index| {
            let seed = derive_game_seed(base_seed, index as u64);
            simulate_game(setup.clone(), config.clone(), seed).with_context(|| format!("game {index} (seed {seed})"))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub games: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub overtime_games: u32,
    pub home_win_rate: f32,
    pub overtime_rate: f32,
    pub avg_home_points: f32,
    pub avg_away_points: f32,
    pub avg_combined_points: f32,
    pub avg_possessions: f32,
}

pub fn summarize(results: &[GameResult]) -> BatchSummary {
    let games = results.len() as u32;
    let per_game = |total: u64| if games == 0 { 0.0 } else { total as f32 / games as f32 };

    let home_wins = results.iter().filter(|r| r.winner() == Some(TeamSide::Home)).count() as u32;
    let away_wins = results.iter().filter(|r| r.winner() == Some(TeamSide::Away)).count() as u32;
    let overtime_games = results.iter().filter(|r| r.is_overtime).count() as u32;
    let home_points: u64 = results.iter().map(|r| r.home_score as u64).sum();
    let away_points: u64 = results.iter().map(|r| r.away_score as u64).sum();
    let possessions: u64 = results.iter().map(|r| r.total_possessions as u64).sum();

    BatchSummary {
        games,
        home_wins,
        away_wins,
        overtime_games,
        home_win_rate: per_game(home_wins as u64),
        overtime_rate: per_game(overtime_games as u64),
        avg_home_points: per_game(home_points),
        avg_away_points: per_game(away_points),
        avg_combined_points: per_game(home_points + away_points),
        avg_possessions: per_game(possessions),
    }
}

/// One play-by-play line, e.g. `Q2 7:41  home  made_shot  Home PG1 (54-50)`.
pub fn format_event(event: &GameEvent) -> String {
    let period = if event.quarter > 4 { format!("OT{}", event.quarter - 4) } else { format!("Q{}", event.quarter) };
    let side = event.side.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
    let kind = serde_json::to_value(event.event_type)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", event.event_type));

    let mut line = format!("{period:<4}{:>5}  {side:<4}  {kind:<16}", event.clock);
    if let Some(details) = &event.details {
        if let Some(player) = event.player_name().or(details.player_in.as_deref()) {
            line.push(' ');
            line.push_str(player);
        }
        if event.event_type.is_scoring() && event.points_scored() > 0 {
            line.push_str(&format!(" +{}", event.points_scored()));
        }
        if let (Some(home), Some(away)) = (details.home_score, details.away_score) {
            line.push_str(&format!(" ({home}-{away})"));
        }
    }
    line.trim_end().to_string()
}

/// One box score row with shooting splits.
pub fn format_stat_line(line: &PlayerStatLine) -> String {
    format!(
        "{:<16}{:<3}{:>5.1}m {:>3} pts {:>2}/{:<2} FG ({:.0}%) {:>2}/{:<2} 3P ({:.0}%) {:>2}/{:<2} FT ({:.0}%) {:>2} reb {:>2} ast",
        line.name,
        line.position.as_str(),
        line.minutes,
        line.points,
        line.fgm,
        line.fga,
        line.fg_pct() * 100.0,
        line.tpm,
        line.tpa,
        line.three_pct() * 100.0,
        line.ftm,
        line.fta,
        line.ft_pct() * 100.0,
        line.rebounds,
        line.assists,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_batch_is_reproducible() {
        let setup = build_setup(None, None, false).unwrap();
        let a = run_batch(&setup, &SimConfig::default(), 9, 8).unwrap();
        let b = run_batch(&setup, &SimConfig::default(), 9, 8).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        // Each game gets its own seed
        assert_ne!(a[0].seed, a[1].seed);
    }

    #[test]
    fn test_summary_counts() {
        let setup = build_setup(None, None, false).unwrap();
        let results = run_batch(&setup, &SimConfig::default(), 1, 20).unwrap();
        let summary = summarize(&results);
        assert_eq!(summary.games, 20);
        assert_eq!(summary.home_wins + summary.away_wins, 20);
        assert!((summary.avg_combined_points - summary.avg_home_points - summary.avg_away_points).abs() < 1e-3);
        assert!(summary.avg_possessions > 100.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.games, 0);
        assert_eq!(summary.avg_combined_points, 0.0);
    }

    #[test]
    fn test_load_team_from_json() {
        let team = fixtures::balanced_team("bulls", "Bulls", Tier::Two, 70.0);
        let file = write_temp(".json", &serde_json::to_string(&team).unwrap());
        let loaded = load_team(file.path()).unwrap();
        assert_eq!(loaded, team);
    }

    #[test]
    fn test_load_team_rejects_empty_roster() {
        let file = write_temp(".json", r#"{"id": "x", "name": "X"}"#);
        assert!(load_team(file.path()).is_err());
    }

    #[test]
    fn test_load_config_by_extension() {
        let yaml = write_temp(".yaml", "foul:\n  foul_chance: 0.1\n");
        assert_eq!(load_config(yaml.path()).unwrap().foul.foul_chance, 0.1);

        let json = write_temp(".json", r#"{"foul": {"foul_chance": 0.2}}"#);
        assert_eq!(load_config(json.path()).unwrap().foul.foul_chance, 0.2);

        let bad = write_temp(".json", r#"{"substitution": {"check_interval": 0}}"#);
        assert!(load_config(bad.path()).is_err());
    }

    #[test]
    fn test_same_team_twice_is_rejected() {
        let team = fixtures::balanced_team("bulls", "Bulls", Tier::One, 70.0);
        let file = write_temp(".json", &serde_json::to_string(&team).unwrap());
        assert!(build_setup(Some(file.path()), Some(file.path()), false).is_err());
    }

    #[test]
    fn test_format_event_line() {
        let setup = build_setup(None, None, false).unwrap();
        let result = simulate_game(setup, SimConfig::default(), 4).unwrap();
        let last = result.events.last().unwrap();
        let line = format_event(last);
        assert!(line.contains("game_end"), "{line}");
        assert!(line.contains(&format!("({}-{})", result.home_score, result.away_score)), "{line}");

        let made = result.events.iter().find(|e| e.event_type == hoops_core::models::EventType::MadeShot).unwrap();
        assert!(format_event(made).contains(" +"), "{}", format_event(made));
    }

    #[test]
    fn test_format_stat_line_shows_shooting() {
        let result = simulate_game(build_setup(None, None, false).unwrap(), SimConfig::default(), 5).unwrap();
        let line = &result.home_players[0];
        let row = format_stat_line(line);
        assert!(row.starts_with(&line.name));
        assert!(row.contains(&format!("{} pts", line.points)));
    }
}
