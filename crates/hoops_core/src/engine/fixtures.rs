//! Balanced demo rosters shared by tests, benches and the CLI demo mode.

use crate::models::{GameSetup, Player, Position, RotationEntry, Team, TeamSetup, Tier};

const STARTER_MINUTES: f32 = 32.0;
const BENCH_MINUTES: f32 = 16.0;

/// Ten players, two per position, all rated `rating`.
#[doc(hidden)]
pub fn balanced_team(id: &str, name: &str, tier: Tier, rating: f32) -> Team {
    let mut team = Team::new(id, name, tier);
    for depth in 1..=2 {
        for position in Position::ALL {
            team.players.push(Player::new(
                format!("{id}-{}{depth}", position.as_str().to_lowercase()),
                format!("{name} {}{depth}", position.as_str()),
                position,
                rating,
            ));
        }
    }
    team
}

/// First unit starts and plays 32 minutes, second unit 16. Usage follows minutes.
#[doc(hidden)]
pub fn balanced_team_setup(id: &str, name: &str, tier: Tier, rating: f32) -> TeamSetup {
    let team = balanced_team(id, name, tier, rating);
    let rotation = team
        .players
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let is_starter = idx < Position::ALL.len();
            let minutes = if is_starter { STARTER_MINUTES } else { BENCH_MINUTES };
            RotationEntry::new(player.clone(), is_starter, minutes, rating).with_usage(minutes / 240.0)
        })
        .collect();
    TeamSetup::new(team, rotation)
}

/// Identical tier-1 teams with neutral chemistry and coaching.
#[doc(hidden)]
pub fn balanced_setup(rating: f32) -> GameSetup {
    GameSetup::new(
        balanced_team_setup("home", "Home", Tier::One, rating),
        balanced_team_setup("away", "Away", Tier::One, rating),
    )
}
