//! Scorecard aggregation: top performers, boundary counts, run-type split and
//! the head-to-head team comparison.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::run_rate;
use crate::models::{BattingEntry, BowlingEntry, MatchSnapshot, TeamBatting, TeamBowling, TeamSide};

/// Share of non-boundary runs credited to singles, doubles and triples.
pub const SINGLES_SHARE: f64 = 0.6;
pub const DOUBLES_SHARE: f64 = 0.3;
pub const TRIPLES_SHARE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TopScorer {
    pub team: String,
    #[serde(flatten)]
    pub entry: BattingEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TopWicketTaker {
    pub team: String,
    #[serde(flatten)]
    pub entry: BowlingEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BoundaryTotals {
    pub team: String,
    pub fours: u32,
    pub sixes: u32,
    pub total_boundary_runs: u32,
}

/// Runs by scoring shot for one team.
///
/// Singles, doubles and triples are not tracked ball by ball, so they are a
/// fixed 60/30/10 split of each batter's non-boundary runs. `approximate` is
/// always set while that remains the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunsDistribution {
    pub team: String,
    pub singles_runs: u32,
    pub doubles_runs: u32,
    pub triples_runs: u32,
    pub fours_runs: u32,
    pub sixes_runs: u32,
    pub approximate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamComparison {
    pub team: String,
    pub runs: u32,
    pub wickets: u8,
    pub overs: f64,
    pub run_rate: f64,
}

/// Highest individual score across every team's card.
///
/// Ties go to the first batter met in card order. There is deliberately no
/// strike-rate tie-break.
pub fn top_scorer(batting: &[TeamBatting]) -> Option<TopScorer> {
    let mut best: Option<(&str, &BattingEntry)> = None;
    for team in batting {
        for player in &team.players {
            if best.map_or(true, |(_, b)| player.runs > b.runs) {
                best = Some((&team.team, player));
            }
        }
    }
    best.map(|(team, entry)| TopScorer { team: team.to_string(), entry: entry.clone() })
}

/// Most wickets across every team's bowling card; first encountered wins ties.
pub fn top_wicket_taker(bowling: &[TeamBowling]) -> Option<TopWicketTaker> {
    let mut best: Option<(&str, &BowlingEntry)> = None;
    for team in bowling {
        for player in &team.players {
            if best.map_or(true, |(_, b)| player.wickets > b.wickets) {
                best = Some((&team.team, player));
            }
        }
    }
    best.map(|(team, entry)| TopWicketTaker { team: team.to_string(), entry: entry.clone() })
}

pub fn boundary_totals(batting: &[TeamBatting]) -> Vec<BoundaryTotals> {
    batting
        .iter()
        .map(|team| {
            let fours = team.players.iter().fold(0u32, |acc, p| acc.saturating_add(p.fours));
            let sixes = team.players.iter().fold(0u32, |acc, p| acc.saturating_add(p.sixes));
            let total_boundary_runs = fours.saturating_mul(4).saturating_add(sixes.saturating_mul(6));
            if total_boundary_runs == u32::MAX {
                log::warn!("{}: boundary counts overflow; totals saturated", team.team);
            }
            BoundaryTotals { team: team.team.clone(), fours, sixes, total_boundary_runs }
        })
        .collect()
}

pub fn runs_type_distribution(batting: &[TeamBatting]) -> Vec<RunsDistribution> {
    batting
        .iter()
        .map(|team| {
            let mut dist = RunsDistribution {
                team: team.team.clone(),
                singles_runs: 0,
                doubles_runs: 0,
                triples_runs: 0,
                fours_runs: 0,
                sixes_runs: 0,
                approximate: true,
            };
            for player in &team.players {
                let boundary = player.boundary_runs();
                let other = match player.runs.checked_sub(boundary) {
                    Some(other) => other,
                    None => {
                        log::warn!(
                            "{} ({}): {} boundary runs exceed {} total; counting no other runs",
                            player.name,
                            team.team,
                            boundary,
                            player.runs
                        );
                        0
                    }
                };
                let other = other as f64;
                dist.singles_runs = dist.singles_runs.saturating_add(run_rate::round_count(other * SINGLES_SHARE));
                dist.doubles_runs = dist.doubles_runs.saturating_add(run_rate::round_count(other * DOUBLES_SHARE));
                dist.triples_runs = dist.triples_runs.saturating_add(run_rate::round_count(other * TRIPLES_SHARE));
                dist.fours_runs = dist.fours_runs.saturating_add(player.fours.saturating_mul(4));
                dist.sixes_runs = dist.sixes_runs.saturating_add(player.sixes.saturating_mul(6));
            }
            dist
        })
        .collect()
}

/// Runs, wickets, overs and run rate for both listed teams. An innings that
/// has not started reports zeros.
pub fn team_comparison(snapshot: &MatchSnapshot) -> Vec<TeamComparison> {
    let summary = &snapshot.summary;
    [TeamSide::Team1, TeamSide::Team2]
        .into_iter()
        .map(|side| {
            let line = summary.score(side).or_zero();
            let overs = line.overs.as_notation();
            TeamComparison {
                team: summary.team(side).to_string(),
                runs: line.runs,
                wickets: line.wickets,
                overs,
                run_rate: run_rate::run_rate(line.runs, overs),
            }
        })
        .collect()
}

/// Overwrite every stored strike rate with `runs / balls * 100`. Only for
/// callers that explicitly distrust the card.
pub fn recompute_strike_rates(batting: &mut [TeamBatting]) {
    for team in batting.iter_mut() {
        for player in team.players.iter_mut() {
            player.strike_rate = run_rate::round2(player.derived_strike_rate());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, Overs, RawMatchDetail, RawMatchSummary};
    use insta::assert_json_snapshot;

    fn bat(name: &str, runs: u32, balls: u32, fours: u32, sixes: u32) -> BattingEntry {
        BattingEntry {
            name: name.to_string(),
            runs,
            balls,
            fours,
            sixes,
            strike_rate: run_rate::round2(run_rate::strike_rate(runs, balls)),
            dismissal: "not out".to_string(),
        }
    }

    fn bowl(name: &str, wickets: u32, economy: f64) -> BowlingEntry {
        BowlingEntry {
            name: name.to_string(),
            overs: Overs::whole(10),
            maidens: 0,
            runs_conceded: (economy * 10.0) as u32,
            wickets,
            economy,
        }
    }

    fn cards() -> Vec<TeamBatting> {
        vec![
            TeamBatting {
                team: "India".into(),
                players: vec![
                    bat("Rohit Sharma", 78, 64, 8, 2),
                    bat("Virat Kohli", 82, 78, 7, 3),
                    bat("KL Rahul", 25, 28, 2, 0),
                ],
            },
            TeamBatting {
                team: "Australia".into(),
                players: vec![bat("Steve Smith", 68, 75, 7, 0), bat("Glenn Maxwell", 24, 18, 2, 1)],
            },
        ]
    }

    #[test]
    fn test_top_scorer_carries_team_and_full_entry() {
        let top = top_scorer(&cards()).unwrap();
        assert_eq!(top.team, "India");
        assert_eq!(top.entry, bat("Virat Kohli", 82, 78, 7, 3));
    }

    #[test]
    fn test_top_scorer_ties_keep_first_encountered() {
        let batting = vec![
            TeamBatting { team: "A".into(), players: vec![bat("First", 50, 80, 0, 0)] },
            TeamBatting { team: "B".into(), players: vec![bat("Second", 50, 20, 0, 0)] },
        ];
        let top = top_scorer(&batting).unwrap();
        assert_eq!(top.entry.name, "First");
        assert_eq!(top.team, "A");
    }

    #[test]
    fn test_top_performers_empty() {
        assert!(top_scorer(&[]).is_none());
        assert!(top_wicket_taker(&[TeamBowling::default()]).is_none());
    }

    #[test]
    fn test_top_wicket_taker() {
        let bowling = vec![
            TeamBowling { team: "Australia".into(), players: vec![bowl("Starc", 1, 6.89), bowl("Hazlewood", 1, 4.5)] },
            TeamBowling { team: "India".into(), players: vec![bowl("Bumrah", 3, 4.2), bowl("Shami", 3, 4.0)] },
        ];
        let top = top_wicket_taker(&bowling).unwrap();
        assert_eq!(top.entry.name, "Bumrah");
        assert_eq!(top.team, "India");
    }

    #[test]
    fn test_boundary_totals() {
        assert_json_snapshot!(boundary_totals(&cards()), @r###"
        [
          {
            "team": "India",
            "fours": 17,
            "sixes": 5,
            "total_boundary_runs": 98
          },
          {
            "team": "Australia",
            "fours": 9,
            "sixes": 1,
            "total_boundary_runs": 42
          }
        ]
        "###);
    }

    #[test]
    fn test_runs_distribution_is_flagged_approximate() {
        let dist = runs_type_distribution(&cards());
        let india = &dist[0];
        // Rohit 78 - 44 = 34, Kohli 82 - 46 = 36, Rahul 25 - 8 = 17
        assert_eq!(india.singles_runs, 20 + 22 + 10);
        assert_eq!(india.doubles_runs, 10 + 11 + 5);
        assert_eq!(india.triples_runs, 3 + 4 + 2);
        assert_eq!(india.fours_runs, 68);
        assert_eq!(india.sixes_runs, 30);
        assert!(dist.iter().all(|d| d.approximate));
    }

    #[test]
    fn test_runs_distribution_clamps_inconsistent_card() {
        let batting = vec![TeamBatting { team: "X".into(), players: vec![bat("Odd", 10, 5, 3, 0)] }];
        let dist = runs_type_distribution(&batting);
        assert_eq!(dist[0].singles_runs, 0);
        assert_eq!(dist[0].fours_runs, 12);
    }

    #[test]
    fn test_huge_boundary_counts_saturate() {
        let batting = vec![TeamBatting {
            team: "X".into(),
            players: vec![bat("Big", 10, 5, 1_500_000_000, 0), bat("Bigger", 10, 5, u32::MAX, u32::MAX)],
        }];
        let totals = boundary_totals(&batting);
        assert_eq!(totals[0].fours, u32::MAX);
        assert_eq!(totals[0].total_boundary_runs, u32::MAX);

        let dist = runs_type_distribution(&batting);
        assert_eq!(dist[0].singles_runs, 0);
        assert_eq!(dist[0].fours_runs, u32::MAX);
        assert_eq!(dist[0].sixes_runs, u32::MAX);
    }

    #[test]
    fn test_team_comparison_reads_not_started_as_zero() {
        let detail = RawMatchDetail {
            summary: RawMatchSummary {
                id: 9,
                team1: "England".into(),
                team2: "New Zealand".into(),
                score1: "310/6 (50 ov)".into(),
                score2: "--".into(),
                status: MatchStatus::Live,
                venue: String::new(),
            },
            date: String::new(),
            batting: vec![],
            bowling: vec![],
            recent_overs: vec![],
        };
        let rows = team_comparison(&MatchSnapshot::normalize(&detail));
        assert_eq!(rows[0].team, "England");
        assert_eq!(rows[0].run_rate, 6.2);
        assert_eq!(rows[0].overs, 50.0);
        assert_eq!(rows[1].runs, 0);
        assert_eq!(rows[1].run_rate, 0.0);
    }

    #[test]
    fn test_recompute_strike_rates_is_opt_in() {
        let mut batting = vec![TeamBatting {
            team: "A".into(),
            players: vec![BattingEntry { strike_rate: 1.0, ..bat("P", 30, 20, 0, 0) }],
        }];
        assert_eq!(top_scorer(&batting).unwrap().entry.strike_rate, 1.0);
        recompute_strike_rates(&mut batting);
        assert_eq!(batting[0].players[0].strike_rate, 150.0);
    }
}
