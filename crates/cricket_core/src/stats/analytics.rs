//! One-shot derivation of every analytics view for a match.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::bowler_ranking::{self, RankedBowler};
use super::performance::{self, BoundaryTotals, RunsDistribution, TeamComparison, TopScorer, TopWicketTaker};
use super::run_rate;
use super::timeline::{OverProgress, Timeline, TimelineReconstructor};
use crate::config::EngineConfig;
use crate::models::{MatchSnapshot, Over, TeamSide};

/// Everything the scorecard and stats views show, derived from a single
/// snapshot. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchAnalytics {
    pub match_id: u32,
    pub teams: Vec<TeamComparison>,
    /// Side the recent overs belong to, when an innings is in progress.
    pub batting_side: Option<TeamSide>,
    pub timeline: Timeline,
    pub runs_progression: Vec<OverProgress>,
    /// Average runs per over across the recent overs.
    pub recent_run_rate: f64,
    pub top_scorer: Option<TopScorer>,
    pub top_wicket_taker: Option<TopWicketTaker>,
    pub boundary_totals: Vec<BoundaryTotals>,
    pub runs_distribution: Vec<RunsDistribution>,
    pub bowler_ranking: Vec<RankedBowler>,
}

impl MatchAnalytics {
    pub fn derive(snapshot: &MatchSnapshot, config: &EngineConfig) -> Self {
        let batting_side = snapshot.summary.batting_side(config.innings.overs_limit);

        let mut reconstructor = TimelineReconstructor::from_config(&config.timeline);
        if let Some((runs, wickets)) = baseline(snapshot, batting_side) {
            reconstructor = reconstructor.with_baseline(runs, wickets);
        }
        let timeline = reconstructor.reconstruct(&snapshot.recent_overs);
        let runs_progression = timeline.runs_progression();

        log::debug!(
            "match {}: {} timeline events from {} overs",
            snapshot.id(),
            timeline.events.len(),
            snapshot.recent_overs.len()
        );

        Self {
            match_id: snapshot.id(),
            teams: performance::team_comparison(snapshot),
            batting_side,
            timeline,
            runs_progression,
            recent_run_rate: run_rate::average_runs_per_over(&snapshot.recent_overs),
            top_scorer: performance::top_scorer(&snapshot.batting),
            top_wicket_taker: performance::top_wicket_taker(&snapshot.bowling),
            boundary_totals: performance::boundary_totals(&snapshot.batting),
            runs_distribution: performance::runs_type_distribution(&snapshot.batting),
            bowler_ranking: bowler_ranking::rank_teams(&snapshot.bowling),
        }
    }
}

/// Score before the first recent over: the batting side's total less what
/// the recent overs account for. `None` when there is no side at the crease
/// or the overs claim more than the score does.
fn baseline(snapshot: &MatchSnapshot, side: Option<TeamSide>) -> Option<(u32, u32)> {
    let line = snapshot.summary.score(side?).score_line()?;
    let over_runs: u32 = snapshot.recent_overs.iter().map(Over::runs).sum();
    let over_wickets: u32 = snapshot.recent_overs.iter().map(Over::wickets).sum();
    let runs = line.runs.checked_sub(over_runs);
    let wickets = (line.wickets as u32).checked_sub(over_wickets);
    match (runs, wickets) {
        (Some(runs), Some(wickets)) => Some((runs, wickets)),
        _ => {
            log::debug!("match {}: recent overs exceed the reported score; no baseline", snapshot.id());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixtureSource, MatchDataSource};

    fn snapshot(id: u32) -> MatchSnapshot {
        let raw = FixtureSource::embedded().get_match_detail(id).unwrap();
        MatchSnapshot::normalize(&raw)
    }

    #[test]
    fn test_derive_first_innings_fixture() {
        let analytics = MatchAnalytics::derive(&snapshot(1), &EngineConfig::default());
        assert_eq!(analytics.match_id, 1);
        assert_eq!(analytics.batting_side, Some(TeamSide::Team1));
        assert_eq!(analytics.recent_run_rate, 8.33);

        // 275/4 less the 25 runs of overs 40..=42
        assert_eq!(analytics.timeline.cumulative_runs, 275);
        assert_eq!(analytics.timeline.wickets, 4);
        let progression: Vec<u32> = analytics.runs_progression.iter().map(|p| p.runs).collect();
        assert_eq!(progression, vec![254, 261, 275]);

        let top = analytics.top_scorer.unwrap();
        assert_eq!(top.entry.name, "Virat Kohli");
        assert_eq!(analytics.teams[0].run_rate, 6.5);
        assert!(analytics.runs_distribution.iter().all(|d| d.approximate));
    }

    #[test]
    fn test_derive_chasing_fixture() {
        let analytics = MatchAnalytics::derive(&snapshot(2), &EngineConfig::default());
        assert_eq!(analytics.batting_side, Some(TeamSide::Team2));
        assert_eq!(analytics.teams[1].run_rate, 5.61);
        let wickets = analytics.timeline.events_of(crate::stats::TimelineEventKind::Wicket).count();
        assert_eq!(wickets, 1);
        assert_eq!(analytics.timeline.cumulative_runs, 120);
    }

    #[test]
    fn test_derive_is_pure() {
        let snap = snapshot(2);
        let config = EngineConfig::default();
        assert_eq!(MatchAnalytics::derive(&snap, &config), MatchAnalytics::derive(&snap, &config));
    }

    #[test]
    fn test_derive_without_overs_or_cards() {
        let mut snap = snapshot(1);
        snap.recent_overs.clear();
        snap.batting.clear();
        snap.bowling.clear();
        let analytics = MatchAnalytics::derive(&snap, &EngineConfig::default());
        assert!(analytics.timeline.is_empty());
        assert_eq!(analytics.recent_run_rate, 0.0);
        assert!(analytics.top_scorer.is_none());
        assert!(analytics.bowler_ranking.is_empty());
        assert_eq!(analytics.teams.len(), 2);
    }
}
