use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::over::Over;
use super::score::{InningsScore, MAX_WICKETS};
use super::scorecard::{TeamBatting, TeamBowling};
use crate::notation;
use crate::stats::run_rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MatchStatus {
    Live,
    Upcoming,
    Completed,
}

impl MatchStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, MatchStatus::Live)
    }
}

/// Which of the two listed teams an innings belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Team1,
    Team2,
}

// ============================================================================
// Raw records, as the data source hands them over
// ============================================================================

/// Match list entry with score text still in `"R/W (O ov)"` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatchSummary {
    pub id: u32,
    pub team1: String,
    pub team2: String,
    #[serde(default = "not_started_text")]
    pub score1: String,
    #[serde(default = "not_started_text")]
    pub score2: String,
    pub status: MatchStatus,
    #[serde(default)]
    pub venue: String,
}

fn not_started_text() -> String {
    notation::NOT_STARTED.to_string()
}

/// Full match record: list fields plus scorecards and the most recent overs
/// (newest first, as the source supplies them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchDetail {
    #[serde(flatten)]
    pub summary: RawMatchSummary,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub batting: Vec<TeamBatting>,
    #[serde(default)]
    pub bowling: Vec<TeamBowling>,
    #[serde(default)]
    pub recent_overs: Vec<Over>,
}

// ============================================================================
// Normalized records
// ============================================================================

/// A match list entry with parsed scores and current run rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSummary {
    pub id: u32,
    pub team1: String,
    pub team2: String,
    pub score1: InningsScore,
    pub score2: InningsScore,
    pub status: MatchStatus,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_rate1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_rate2: Option<f64>,
}

impl MatchSummary {
    /// Parse both score strings. Unreadable scores become zero scores (the
    /// codec logs them) so one bad record never blanks the list.
    pub fn normalize(raw: &RawMatchSummary) -> Self {
        let score1 = notation::parse_score_or_default(&raw.score1);
        let score2 = notation::parse_score_or_default(&raw.score2);
        Self {
            id: raw.id,
            team1: raw.team1.clone(),
            team2: raw.team2.clone(),
            score1,
            score2,
            status: raw.status,
            venue: raw.venue.clone(),
            run_rate1: current_run_rate(&score1),
            run_rate2: current_run_rate(&score2),
        }
    }

    /// Back to wire form; scores are written with the codec.
    pub fn to_raw(&self) -> RawMatchSummary {
        RawMatchSummary {
            id: self.id,
            team1: self.team1.clone(),
            team2: self.team2.clone(),
            score1: notation::format_innings(&self.score1),
            score2: notation::format_innings(&self.score2),
            status: self.status,
            venue: self.venue.clone(),
        }
    }

    pub fn team(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    pub fn score(&self, side: TeamSide) -> &InningsScore {
        match side {
            TeamSide::Team1 => &self.score1,
            TeamSide::Team2 => &self.score2,
        }
    }

    pub fn score_mut(&mut self, side: TeamSide) -> &mut InningsScore {
        match side {
            TeamSide::Team1 => &mut self.score1,
            TeamSide::Team2 => &mut self.score2,
        }
    }

    pub fn run_rate_mut(&mut self, side: TeamSide) -> &mut Option<f64> {
        match side {
            TeamSide::Team1 => &mut self.run_rate1,
            TeamSide::Team2 => &mut self.run_rate2,
        }
    }

    /// The side currently at the crease: the second innings while it is in
    /// progress, otherwise the first innings while it is in progress.
    pub fn batting_side(&self, overs_limit: u32) -> Option<TeamSide> {
        [TeamSide::Team2, TeamSide::Team1]
            .into_iter()
            .find(|side| innings_in_progress(self.score(*side), overs_limit))
    }
}

fn current_run_rate(score: &InningsScore) -> Option<f64> {
    score
        .score_line()
        .map(|line| run_rate::run_rate(line.runs, line.overs.as_notation()))
}

fn innings_in_progress(score: &InningsScore, overs_limit: u32) -> bool {
    match score.score_line() {
        None => false,
        Some(line) => line.wickets < MAX_WICKETS && line.overs.completed() < overs_limit,
    }
}

/// Everything known about one match at one refresh. Built fresh on each
/// fetch and replaced wholesale; derived views are recomputed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSnapshot {
    pub summary: MatchSummary,
    pub date: String,
    pub batting: Vec<TeamBatting>,
    pub bowling: Vec<TeamBowling>,
    /// Overs of the live innings in source order.
    pub recent_overs: Vec<Over>,
}

impl MatchSnapshot {
    pub fn normalize(raw: &RawMatchDetail) -> Self {
        Self {
            summary: MatchSummary::normalize(&raw.summary),
            date: raw.date.clone(),
            batting: raw.batting.clone(),
            bowling: raw.bowling.clone(),
            recent_overs: raw.recent_overs.clone(),
        }
    }

    pub fn id(&self) -> u32 {
        self.summary.id
    }

    pub fn is_live(&self) -> bool {
        self.summary.status.is_live()
    }
}
