//! JSON entry points for hosts that talk to the engine in strings.

use schemars::schema_for;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::response::ApiResponse;
use crate::config::EngineConfig;
use crate::error::{CoreError, Result};
use crate::models::{MatchSnapshot, MatchSummary};
use crate::sim::{LiveScoreSimulator, TickOutcome};
use crate::source::{FixtureSet, FixtureSource, MatchDataSource};
use crate::stats::MatchAnalytics;

/// Request/response schema version.
pub const SCHEMA_VERSION: u8 = 1;

/// Upper bound on simulated ticks per list request.
pub const MAX_TICKS: u32 = 10_000;

#[derive(Debug, Deserialize)]
pub struct ListMatchesRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub seed: u64,
    /// Simulator ticks to apply before answering.
    #[serde(default)]
    pub ticks: u32,
    /// Records to use instead of the embedded fixtures.
    #[serde(default)]
    pub fixtures: Option<FixtureSet>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMatchesResponse {
    pub schema_version: u8,
    pub matches: Vec<MatchSummary>,
    /// One entry per tick, each holding one outcome per match.
    pub ticks: Vec<Vec<TickOutcome>>,
}

#[derive(Debug, Deserialize)]
pub struct DeriveMatchRequest {
    pub schema_version: u8,
    pub match_id: u32,
    #[serde(default)]
    pub fixtures: Option<FixtureSet>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeriveMatchResponse {
    pub schema_version: u8,
    pub snapshot: MatchSnapshot,
    pub analytics: MatchAnalytics,
}

fn check_schema_version(version: u8) -> Result<()> {
    if version != SCHEMA_VERSION {
        return Err(CoreError::InvalidRequest(format!("Unsupported schema version: {version}")));
    }
    Ok(())
}

fn resolve(fixtures: Option<FixtureSet>, config: Option<EngineConfig>) -> Result<(FixtureSource, EngineConfig)> {
    let config = match config {
        Some(config) => {
            config.validate()?;
            config
        }
        None => EngineConfig::default(),
    };
    let source = fixtures.map(FixtureSource::new).unwrap_or_else(FixtureSource::embedded);
    Ok((source, config))
}

/// Normalized match list, optionally advanced by `ticks` simulator ticks.
pub fn list_matches_json(request_json: &str) -> Result<String> {
    let request: ListMatchesRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;
    if request.ticks > MAX_TICKS {
        return Err(CoreError::InvalidRequest(format!("ticks {} exceed {MAX_TICKS}", request.ticks)));
    }

    let (source, config) = resolve(request.fixtures, request.config)?;
    let mut matches: Vec<MatchSummary> = source.list_live_matches().iter().map(MatchSummary::normalize).collect();

    let mut ticks = Vec::new();
    if config.simulator.enabled && request.ticks > 0 {
        let mut simulator = LiveScoreSimulator::from_seed(request.seed, &config);
        ticks = (0..request.ticks).map(|_| simulator.tick_all(&mut matches)).collect();
    }
    info!(matches = matches.len(), ticks = ticks.len(), seed = request.seed, "match list served");

    let response = ListMatchesResponse { schema_version: SCHEMA_VERSION, matches, ticks };
    Ok(serde_json::to_string(&response)?)
}

/// Snapshot and full analytics for one match.
pub fn derive_match_json(request_json: &str) -> Result<String> {
    let request: DeriveMatchRequest = serde_json::from_str(request_json)?;
    check_schema_version(request.schema_version)?;

    let (source, config) = resolve(request.fixtures, request.config)?;
    let Some(raw) = source.get_match_detail(request.match_id) else {
        warn!(match_id = request.match_id, "match not found");
        return Err(CoreError::MatchNotFound(request.match_id));
    };
    let snapshot = MatchSnapshot::normalize(&raw);
    let analytics = MatchAnalytics::derive(&snapshot, &config);
    debug!(match_id = request.match_id, events = analytics.timeline.events.len(), "match derived");

    let response = DeriveMatchResponse { schema_version: SCHEMA_VERSION, snapshot, analytics };
    Ok(serde_json::to_string(&response)?)
}

/// [`list_matches_json`] wrapped in an [`ApiResponse`]; never fails.
pub fn list_matches_response_json(request_json: &str) -> String {
    envelope(list_matches_json(request_json))
}

/// [`derive_match_json`] wrapped in an [`ApiResponse`]; never fails.
pub fn derive_match_response_json(request_json: &str) -> String {
    envelope(derive_match_json(request_json))
}

fn envelope(result: Result<String>) -> String {
    let result = result.and_then(|json| Ok(serde_json::from_str::<serde_json::Value>(&json)?));
    if let Err(err) = &result {
        warn!(code = err.code(), "request failed: {err}");
    }
    ApiResponse::from_result(result).to_json()
}

/// JSON Schema of the analytics payload.
pub fn analytics_schema_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&schema_for!(MatchAnalytics))?)
}
