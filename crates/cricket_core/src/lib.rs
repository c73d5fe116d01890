//! # cricket_core - Deterministic Cricket Match Analytics Engine
//!
//! Turns raw match records (score strings, ball-by-ball overs, batting and
//! bowling cards) into derived statistics, and drives a seeded live score
//! simulator over them.
//!
//! ## Features
//! - Score notation codec (`"275/4 (42.3 ov)"`)
//! - Run rate, strike rate and economy math
//! - Chronological timeline with milestones
//! - Top performers, boundary totals and bowler rankings
//! - Seeded live score progression (same seed = same scores)
//! - JSON API for easy integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod notation;
pub mod session;
pub mod sim;
pub mod source;
pub mod stats;

// Re-export main API functions
pub use api::{
    derive_match_json, derive_match_response_json, list_matches_json, list_matches_response_json,
    SCHEMA_VERSION,
};
pub use error::{CoreError, Result};

pub use config::EngineConfig;
pub use models::{
    BallOutcome, BattingEntry, BowlingEntry, InningsScore, MatchSnapshot, MatchStatus, MatchSummary, Over,
    Overs, ScoreLine, TeamBatting, TeamBowling, TeamSide,
};
pub use notation::{format_innings, format_score, parse_score, parse_score_or_default};
pub use session::LiveSession;
pub use sim::{CancelHandle, LiveScoreSimulator, RefreshTask, TickOutcome};
pub use source::{FixtureSource, MatchDataSource};
pub use stats::{MatchAnalytics, Timeline, TimelineReconstructor};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
