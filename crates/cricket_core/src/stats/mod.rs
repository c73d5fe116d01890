//! Derived statistics. Everything here is a pure function of its input and
//! is recomputed from scratch on every refresh.

pub mod analytics;
pub mod bowler_ranking;
pub mod performance;
pub mod run_rate;
pub mod timeline;

pub use analytics::MatchAnalytics;
pub use bowler_ranking::RankedBowler;
pub use performance::{BoundaryTotals, RunsDistribution, TeamComparison, TopScorer, TopWicketTaker};
pub use timeline::{OverProgress, Timeline, TimelineEvent, TimelineEventKind, TimelineReconstructor};
