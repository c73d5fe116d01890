//! Cricket CLI Library
//!
//! Loading and text rendering shared by the `cricket` binary.

use anyhow::{Context, Result};
use cricket_core::sim::TickOutcome;
use cricket_core::stats::TimelineEventKind;
use cricket_core::{format_innings, EngineConfig, FixtureSource, MatchAnalytics, MatchSummary};
use std::fs;
use std::path::Path;

/// Fixture file when given, embedded fixtures otherwise.
pub fn load_source(path: Option<&Path>) -> Result<FixtureSource> {
    match path {
        Some(path) => FixtureSource::from_path(path)
            .with_context(|| format!("Failed to load fixtures: {}", path.display())),
        None => Ok(FixtureSource::embedded()),
    }
}

/// Config file when given, `CRICKET_CONFIG_PATH` otherwise.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => EngineConfig::from_env().context("Failed to load config from environment"),
    }
}

/// One list line: `[1] India 275/4 (42.3 ov) v Australia 230/8 (50 ov) | Live | RR 6.50 / 4.60`
pub fn format_match_line(summary: &MatchSummary) -> String {
    let rate = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |r| format!("{r:.2}"));
    format!(
        "[{}] {} {} v {} {} | {:?} | RR {} / {}",
        summary.id,
        summary.team1,
        format_innings(&summary.score1),
        summary.team2,
        format_innings(&summary.score2),
        summary.status,
        rate(summary.run_rate1),
        rate(summary.run_rate2),
    )
}

/// Short line for a simulator outcome, `None` when nothing changed.
pub fn format_tick(summary: &MatchSummary, outcome: &TickOutcome) -> Option<String> {
    match outcome {
        TickOutcome::Advanced { side, runs_added, run_rate } => {
            let team = summary.team(*side);
            let score = format_innings(summary.score(*side));
            Some(format!("{team} +{runs_added} -> {score} (RR {run_rate:.2})"))
        }
        TickOutcome::Halted | TickOutcome::NoChange => None,
    }
}

/// Multi-line text report of a match's analytics.
pub fn format_report(analytics: &MatchAnalytics) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Match {}", analytics.match_id));
    for team in &analytics.teams {
        lines.push(format!(
            "  {:<16} {:>4}/{:<2} ({} ov)  RR {:.2}",
            team.team, team.runs, team.wickets, team.overs, team.run_rate
        ));
    }
    lines.push(format!("  Recent run rate: {:.2}", analytics.recent_run_rate));

    if let Some(top) = &analytics.top_scorer {
        lines.push(format!(
            "  Top scorer: {} ({}) {} off {}",
            top.entry.name, top.team, top.entry.runs, top.entry.balls
        ));
    }
    if let Some(top) = &analytics.top_wicket_taker {
        lines.push(format!(
            "  Best bowler: {} ({}) {}/{} in {}",
            top.entry.name, top.team, top.entry.wickets, top.entry.runs_conceded, top.entry.overs
        ));
    }
    for totals in &analytics.boundary_totals {
        lines.push(format!(
            "  {}: {} fours, {} sixes ({} runs in boundaries)",
            totals.team, totals.fours, totals.sixes, totals.total_boundary_runs
        ));
    }

    let notable = analytics.timeline.events.iter().filter(|e| e.kind != TimelineEventKind::OverEnd);
    lines.push("  Timeline:".to_string());
    for event in notable {
        lines.push(format!("    {:>5.1}  {}", event.ball_fraction, event.note));
    }
    lines.join("\n")
}

/// Write pretty JSON to `path`, creating parent directories.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_core::{MatchDataSource, MatchSnapshot, TeamSide};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_embedded_and_file_sources() -> Result<()> {
        assert_eq!(load_source(None)?.list_live_matches().len(), 3);

        let mut temp = NamedTempFile::new()?;
        temp.write_all(br#"{"matches": [{"id": 9, "team1": "A", "team2": "B", "status": "Upcoming"}]}"#)?;
        let source = load_source(Some(temp.path()))?;
        assert_eq!(source.list_live_matches()[0].id, 9);

        let mut broken = NamedTempFile::new()?;
        broken.write_all(b"{")?;
        let err = load_source(Some(broken.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to load fixtures"));
        Ok(())
    }

    #[test]
    fn test_load_config_file() -> Result<()> {
        let mut temp = tempfile::Builder::new().suffix(".yaml").tempfile()?;
        temp.write_all(b"refresh:\n  list_interval_secs: 30\n")?;
        let config = load_config(Some(temp.path()))?;
        assert_eq!(config.refresh.list_interval_secs, 30);
        Ok(())
    }

    #[test]
    fn test_format_match_line() -> Result<()> {
        let source = load_source(None)?;
        let raw = &source.list_live_matches()[1];
        let line = format_match_line(&MatchSummary::normalize(raw));
        assert_eq!(line, "[2] England 310/6 (50 ov) v New Zealand 120/2 (21.4 ov) | Live | RR 6.20 / 5.61");
        Ok(())
    }

    #[test]
    fn test_format_tick() -> Result<()> {
        let source = load_source(None)?;
        let summary = MatchSummary::normalize(&source.list_live_matches()[0]);
        assert_eq!(format_tick(&summary, &TickOutcome::NoChange), None);
        let advanced = TickOutcome::Advanced { side: TeamSide::Team1, runs_added: 4, run_rate: 6.5 };
        assert_eq!(format_tick(&summary, &advanced).unwrap(), "India +4 -> 275/4 (42.3 ov) (RR 6.50)");
        Ok(())
    }

    #[test]
    fn test_report_and_json_output() -> Result<()> {
        let source = load_source(None)?;
        let snapshot = MatchSnapshot::normalize(&source.get_match_detail(2).unwrap());
        let analytics = MatchAnalytics::derive(&snapshot, &EngineConfig::default());

        let report = format_report(&analytics);
        assert!(report.contains("Top scorer: Jonny Bairstow (England) 124 off 112"));
        assert!(report.contains("Wicket at 21.5"));

        let dir = tempfile::tempdir()?;
        let out = dir.path().join("nested").join("match.json");
        write_json(&out, &analytics)?;
        let back: MatchAnalytics = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(back.match_id, 2);
        assert_eq!(back.timeline.events.len(), analytics.timeline.events.len());
        Ok(())
    }
}
