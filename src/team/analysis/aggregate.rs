use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::team::analysis::model::{ClassifiedGame, TeamAggregate, TierFlag};

/// How games with an unrecognised tier indicator are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTierPolicy {
    /// Treat the opponent as not flagged; the game always counts.
    #[default]
    Keep,
    /// Leave the game out of the totals entirely.
    Drop,
}

/// Removes wins against flagged opponents, plus unknown-tier games when the
/// policy says so. Everything else is retained in input order.
pub fn retain_games(games: Vec<ClassifiedGame>, policy: UnknownTierPolicy) -> Vec<ClassifiedGame> {
    let total = games.len();
    let mut flagged_wins = 0usize;
    let mut unknown = 0usize;

    let kept: Vec<ClassifiedGame> = games
        .into_iter()
        .filter(|game| {
            if game.is_flagged_win() {
                flagged_wins += 1;
                return false;
            }
            if policy == UnknownTierPolicy::Drop && game.tier_flag == TierFlag::Unknown {
                unknown += 1;
                return false;
            }
            true
        })
        .collect();

    info!(
        total,
        kept = kept.len(),
        flagged_wins,
        unknown,
        "filtered games"
    );
    kept
}

/// Groups retained games by exact team name. Output is sorted by team name.
/// Games without a team name are not attributed to any team.
pub fn aggregate(games: &[ClassifiedGame]) -> Vec<TeamAggregate> {
    let mut teams: BTreeMap<&str, TeamAggregate> = BTreeMap::new();

    for game in games {
        if game.team.is_empty() {
            warn!(row = game.row, "game has no team name, skipping");
            continue;
        }
        teams
            .entry(game.team.as_str())
            .or_insert_with(|| TeamAggregate::new(game.team.clone()))
            .record(game);
    }

    teams.into_values().collect()
}
