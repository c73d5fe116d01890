use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::score::Overs;
use crate::stats::run_rate;

/// One batter's line on the scorecard.
///
/// `strike_rate` is taken as supplied. Nothing in the engine recomputes it
/// unless asked to through [`BattingEntry::with_recomputed_strike_rate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BattingEntry {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    #[serde(default)]
    pub fours: u32,
    #[serde(default)]
    pub sixes: u32,
    #[serde(default)]
    pub strike_rate: f64,
    #[serde(alias = "status", default)]
    pub dismissal: String,
}

impl BattingEntry {
    /// `runs / balls * 100` from the card's own counts.
    pub fn derived_strike_rate(&self) -> f64 {
        run_rate::strike_rate(self.runs, self.balls)
    }

    pub fn with_recomputed_strike_rate(mut self) -> Self {
        self.strike_rate = run_rate::round2(self.derived_strike_rate());
        self
    }

    /// Runs that came from fours and sixes, saturating on absurd cards.
    pub fn boundary_runs(&self) -> u32 {
        self.fours.saturating_mul(4).saturating_add(self.sixes.saturating_mul(6))
    }

    pub fn is_not_out(&self) -> bool {
        self.dismissal.trim().eq_ignore_ascii_case("not out")
    }
}

/// One bowler's figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BowlingEntry {
    pub name: String,
    pub overs: Overs,
    #[serde(default)]
    pub maidens: u32,
    #[serde(rename = "runs")]
    pub runs_conceded: u32,
    pub wickets: u32,
    #[serde(default)]
    pub economy: f64,
}

impl BowlingEntry {
    /// Runs per over from the card's own counts, using the overs notation value.
    pub fn derived_economy(&self) -> f64 {
        run_rate::economy(self.runs_conceded, self.overs.as_notation())
    }
}

/// Batting card for one team.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TeamBatting {
    pub team: String,
    #[serde(default)]
    pub players: Vec<BattingEntry>,
}

/// Bowling card for one team.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TeamBowling {
    pub team: String,
    #[serde(default)]
    pub players: Vec<BowlingEntry>,
}
