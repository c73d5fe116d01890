//! Seeded live score progression.
//!
//! Each tick may add a handful of runs to the side at the crease of a live
//! match. Runs only ever go up; wickets and overs are left exactly as the
//! source reported them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, SimulatorConfig};
use crate::models::{MatchSummary, TeamSide};
use crate::stats::run_rate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Idle,
    Advancing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// The match is not live; nothing was drawn.
    Halted,
    NoChange,
    Advanced { side: TeamSide, runs_added: u32, run_rate: f64 },
}

impl TickOutcome {
    pub fn runs_added(&self) -> u32 {
        match self {
            TickOutcome::Advanced { runs_added, .. } => *runs_added,
            _ => 0,
        }
    }
}

pub struct LiveScoreSimulator<R: Rng = ChaCha8Rng> {
    rng: R,
    config: SimulatorConfig,
    overs_limit: u32,
    phase: SimPhase,
}

impl LiveScoreSimulator<ChaCha8Rng> {
    /// Same seed, same sequence of outcomes.
    pub fn from_seed(seed: u64, config: &EngineConfig) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> LiveScoreSimulator<R> {
    /// Fields set directly rather than loaded through `EngineConfig::validate`
    /// are tolerated: a reversed increment range is read in ascending order.
    pub fn with_rng(rng: R, config: &EngineConfig) -> Self {
        if let Err(reason) = config.simulator.validate() {
            log::warn!("{reason}; simulating with increments {:?}", config.simulator.increment_bounds());
        }
        Self {
            rng,
            config: config.simulator.clone(),
            overs_limit: config.innings.overs_limit,
            phase: SimPhase::Idle,
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Advance one match by one tick.
    pub fn tick(&mut self, summary: &mut MatchSummary) -> TickOutcome {
        if !summary.status.is_live() {
            return TickOutcome::Halted;
        }
        if self.rng.gen::<f64>() < self.config.idle_probability {
            return TickOutcome::NoChange;
        }
        let Some(side) = summary.batting_side(self.overs_limit) else {
            return TickOutcome::NoChange;
        };
        if self.rng.gen::<f64>() < 1.0 - self.config.score_probability {
            return TickOutcome::NoChange;
        }

        self.phase = SimPhase::Advancing;
        let (min, max) = self.config.increment_bounds();
        let runs_added = self.rng.gen_range(min..=max);
        let outcome = match summary.score_mut(side).score_line_mut() {
            Some(line) => {
                line.runs = line.runs.saturating_add(runs_added);
                let rate = run_rate::run_rate(line.runs, line.overs.as_notation());
                *summary.run_rate_mut(side) = Some(rate);
                log::debug!("match {}: {:?} +{} runs, rate {:.2}", summary.id, side, runs_added, rate);
                TickOutcome::Advanced { side, runs_added, run_rate: rate }
            }
            None => TickOutcome::NoChange,
        };
        self.phase = SimPhase::Idle;
        outcome
    }

    /// One tick for every match, in order.
    pub fn tick_all(&mut self, summaries: &mut [MatchSummary]) -> Vec<TickOutcome> {
        summaries.iter_mut().map(|summary| self.tick(summary)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InningsScore, MatchStatus, RawMatchSummary};
    use rand::rngs::StdRng;

    fn summary(score1: &str, score2: &str, status: MatchStatus) -> MatchSummary {
        MatchSummary::normalize(&RawMatchSummary {
            id: 1,
            team1: "India".into(),
            team2: "Australia".into(),
            score1: score1.into(),
            score2: score2.into(),
            status,
            venue: String::new(),
        })
    }

    fn always_scores() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.simulator.idle_probability = 0.0;
        config.simulator.score_probability = 1.0;
        config
    }

    fn runs(score: &InningsScore) -> u32 {
        score.score_line().map_or(0, |line| line.runs)
    }

    #[test]
    fn test_non_live_match_halts_without_drawing() {
        let mut sim = LiveScoreSimulator::from_seed(7, &always_scores());
        let mut done = summary("189/10 (45.2 ov)", "190/3 (40 ov)", MatchStatus::Completed);
        let before = done.clone();
        assert_eq!(sim.tick(&mut done), TickOutcome::Halted);
        assert_eq!(done, before);
    }

    #[test]
    fn test_advances_first_innings_and_recomputes_rate() {
        let mut sim = LiveScoreSimulator::from_seed(7, &always_scores());
        let mut m = summary("275/4 (42.3 ov)", "--", MatchStatus::Live);
        match sim.tick(&mut m) {
            TickOutcome::Advanced { side, runs_added, run_rate: rate } => {
                assert_eq!(side, TeamSide::Team1);
                assert!((1..=6).contains(&runs_added));
                let new_runs = 275 + runs_added;
                assert_eq!(runs(&m.score1), new_runs);
                assert_eq!(rate, run_rate::run_rate(new_runs, 42.3));
                assert_eq!(m.run_rate1, Some(rate));
            }
            other => panic!("expected Advanced, got {other:?}"),
        }
        assert_eq!(m.score2, InningsScore::NotStarted);
        assert_eq!(sim.phase(), SimPhase::Idle);
    }

    #[test]
    fn test_advances_chasing_side_only() {
        let mut sim = LiveScoreSimulator::from_seed(1, &always_scores());
        let mut m = summary("310/6 (50 ov)", "120/2 (21.4 ov)", MatchStatus::Live);
        let outcome = sim.tick(&mut m);
        assert!(matches!(outcome, TickOutcome::Advanced { side: TeamSide::Team2, .. }));
        assert_eq!(runs(&m.score1), 310);
        let line = m.score2.score_line().unwrap();
        assert_eq!(line.wickets, 2);
        assert_eq!(line.overs.as_notation(), 21.4);
    }

    #[test]
    fn test_no_side_at_crease_means_no_change() {
        let mut sim = LiveScoreSimulator::from_seed(3, &always_scores());
        let mut m = summary("250 (50 ov)", "251/4 (50 ov)", MatchStatus::Live);
        assert_eq!(sim.tick(&mut m), TickOutcome::NoChange);
    }

    #[test]
    fn test_idle_draw_leaves_score_alone() {
        let mut config = EngineConfig::default();
        config.simulator.idle_probability = 1.0;
        let mut sim = LiveScoreSimulator::from_seed(3, &config);
        let mut m = summary("275/4 (42.3 ov)", "--", MatchStatus::Live);
        for _ in 0..20 {
            assert_eq!(sim.tick(&mut m), TickOutcome::NoChange);
        }
        assert_eq!(runs(&m.score1), 275);
    }

    #[test]
    fn test_injected_rng() {
        let mut sim = LiveScoreSimulator::with_rng(StdRng::seed_from_u64(5), &always_scores());
        let mut m = summary("10/0 (2 ov)", "--", MatchStatus::Live);
        assert!(matches!(sim.tick(&mut m), TickOutcome::Advanced { .. }));
        assert!(runs(&m.score1) > 10);
    }

    #[test]
    fn test_reversed_increment_range_is_tolerated() {
        let mut config = always_scores();
        config.simulator.min_increment = 5;
        config.simulator.max_increment = 2;
        let mut sim = LiveScoreSimulator::from_seed(11, &config);
        let mut m = summary("10/0 (2 ov)", "--", MatchStatus::Live);
        for _ in 0..20 {
            let added = sim.tick(&mut m).runs_added();
            assert!((2..=5).contains(&added), "added {added}");
        }
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let config = EngineConfig::default();
        let base = vec![
            summary("275/4 (42.3 ov)", "230/8 (50 ov)", MatchStatus::Live),
            summary("310/6 (50 ov)", "120/2 (21.4 ov)", MatchStatus::Live),
        ];
        let run = |seed| {
            let mut sim = LiveScoreSimulator::from_seed(seed, &config);
            let mut matches = base.clone();
            let outcomes: Vec<Vec<TickOutcome>> = (0..30).map(|_| sim.tick_all(&mut matches)).collect();
            (outcomes, matches)
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_runs_never_decrease() {
        let mut sim = LiveScoreSimulator::from_seed(99, &EngineConfig::default());
        let mut matches = vec![
            summary("275/4 (42.3 ov)", "--", MatchStatus::Live),
            summary("189/10 (45.2 ov)", "156/7 (38.4 ov)", MatchStatus::Live),
            summary("--", "--", MatchStatus::Upcoming),
        ];
        let mut previous: Vec<(u32, u32)> = matches.iter().map(|m| (runs(&m.score1), runs(&m.score2))).collect();
        for _ in 0..200 {
            let outcomes = sim.tick_all(&mut matches);
            assert_eq!(outcomes[2], TickOutcome::Halted);
            let current: Vec<(u32, u32)> = matches.iter().map(|m| (runs(&m.score1), runs(&m.score2))).collect();
            for (now, before) in current.iter().zip(&previous) {
                assert!(now.0 >= before.0 && now.1 >= before.1);
            }
            previous = current;
        }
        assert_eq!(runs(&matches[1].score1), 189);
    }
}
