pub mod match_snapshot;
pub mod over;
pub mod score;
pub mod scorecard;

pub use match_snapshot::{
    MatchSnapshot, MatchStatus, MatchSummary, RawMatchDetail, RawMatchSummary, TeamSide,
};
pub use over::{BallOutcome, Over};
pub use score::{InningsScore, Overs, ScoreLine, BALLS_PER_OVER, MAX_WICKETS};
pub use scorecard::{BattingEntry, BowlingEntry, TeamBatting, TeamBowling};
