//! Hoops CLI
//!
//! Headless runner: batch simulations, single games with play-by-play and
//! config preset dumps.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hoops_cli::{build_setup, format_event, format_stat_line, load_config, run_batch, summarize, Preset};
use hoops_core::{LiveGame, SimConfig, TeamSide};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Possession-by-possession basketball game simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate many games and print aggregate results
    Simulate {
        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u32,

        /// Base seed; game i uses a seed derived from (seed, i)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Home team JSON file (balanced demo team when omitted)
        #[arg(long)]
        home: Option<PathBuf>,

        /// Away team JSON file (balanced demo team when omitted)
        #[arg(long)]
        away: Option<PathBuf>,

        /// Config file (.yaml/.yml or .json), overrides --preset
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "standard")]
        preset: Preset,

        #[arg(long, default_value = "false")]
        playoff: bool,

        /// Print the summary as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Play one game and print the play-by-play
    Play {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long)]
        home: Option<PathBuf>,

        #[arg(long)]
        away: Option<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "standard")]
        preset: Preset,

        /// Print the full GameResult as JSON instead of play-by-play
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a config preset as YAML
    Config {
        #[arg(long, value_enum, default_value = "standard")]
        preset: Preset,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { games, seed, home, away, config, preset, playoff, json } => {
            let config = resolve_config(config, preset)?;
            let setup = build_setup(home.as_deref(), away.as_deref(), playoff)?;
            info!(games, seed, home = %setup.home.team.name, away = %setup.away.team.name, "simulating");

            let results = run_batch(&setup, &config, seed, games)?;
            let summary = summarize(&results);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{} vs {} over {} games", setup.home.team.name, setup.away.team.name, summary.games);
                println!("   Home wins:       {} ({:.1}%)", summary.home_wins, summary.home_win_rate * 100.0);
                println!("   Away wins:       {}", summary.away_wins);
                println!("   Overtime:        {} ({:.1}%)", summary.overtime_games, summary.overtime_rate * 100.0);
                println!("   Avg score:       {:.1} - {:.1}", summary.avg_home_points, summary.avg_away_points);
                println!("   Avg combined:    {:.1}", summary.avg_combined_points);
                println!("   Avg possessions: {:.1}", summary.avg_possessions);
            }
        }

        Commands::Play { seed, home, away, config, preset, json } => {
            let config = resolve_config(config, preset)?;
            let setup = build_setup(home.as_deref(), away.as_deref(), false)?;
            let mut game = LiveGame::new(setup, config, seed)?;

            if json {
                let result = game.finish();
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            for event in &game.result().events {
                println!("{}", format_event(event));
            }
            while !game.is_complete() {
                for event in game.step()? {
                    println!("{}", format_event(&event));
                }
            }
            let snapshot = game.state();
            println!(
                "\nFinal: {} {} - {} {}",
                snapshot.home_team, snapshot.home_score, snapshot.away_score, snapshot.away_team
            );

            let result = game.result();
            for side in TeamSide::BOTH {
                let team = if side.is_home() { &snapshot.home_team } else { &snapshot.away_team };
                println!("\n{team}");
                for line in result.players(side).iter().filter(|l| l.minutes > 0.0) {
                    println!("   {}", format_stat_line(line));
                }
            }
        }

        Commands::Config { preset } => {
            let yaml = serde_yaml::to_string(&preset.config()).context("serializing config")?;
            print!("{yaml}");
        }
    }

    Ok(())
}

fn resolve_config(path: Option<PathBuf>, preset: Preset) -> Result<SimConfig> {
    match path {
        Some(path) => load_config(&path),
        None => Ok(preset.config()),
    }
}
