use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{BowlingEntry, TeamBowling};

/// A bowler with the team they bowl for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedBowler {
    pub team: String,
    #[serde(flatten)]
    pub entry: BowlingEntry,
}

/// Most wickets first, then lowest economy. Stable, so bowlers level on both
/// keep their card order.
pub fn rank(bowlers: &[BowlingEntry]) -> Vec<BowlingEntry> {
    let mut ranked = bowlers.to_vec();
    ranked.sort_by(compare);
    ranked
}

/// Every bowler from every team, flattened in card order and then ranked.
pub fn rank_teams(teams: &[TeamBowling]) -> Vec<RankedBowler> {
    let mut ranked: Vec<RankedBowler> = teams
        .iter()
        .flat_map(|team| {
            team.players
                .iter()
                .map(move |entry| RankedBowler { team: team.team.clone(), entry: entry.clone() })
        })
        .collect();
    ranked.sort_by(|a, b| compare(&a.entry, &b.entry));
    ranked
}

fn compare(a: &BowlingEntry, b: &BowlingEntry) -> Ordering {
    b.wickets
        .cmp(&a.wickets)
        .then_with(|| a.economy.total_cmp(&b.economy))
}
